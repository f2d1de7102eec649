//! Text summaries of an exported dataset.
//!
//! The chart never waits on this module: a summary is requested with the
//! export document, runs on its own thread and always ends in an `Analysis`,
//! falling back to a fixed text when the generator fails.

#[cfg(feature = "analysis")]
mod gemini;

use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::ChartKind;
use crate::error::{ChartError, ChartResult};
use crate::export::ExportDocument;

#[cfg(feature = "analysis")]
pub use gemini::{GEMINI_MODEL, GeminiClient};

const FALLBACK_TITLE: &str = "Analysis Failed";
const FALLBACK_DESCRIPTION: &str =
    "Could not generate an AI analysis for this dataset. Please try again later.";

/// Generated title and one-paragraph description of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub title: String,
    pub description: String,
}

impl Analysis {
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            title: FALLBACK_TITLE.to_owned(),
            description: FALLBACK_DESCRIPTION.to_owned(),
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.title == FALLBACK_TITLE && self.description == FALLBACK_DESCRIPTION
    }
}

/// Anything that turns a prompt into a JSON reply.
pub trait TextGenerator: Send {
    fn generate(&self, prompt: &str) -> ChartResult<String>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> ChartResult<String> + Send,
{
    fn generate(&self, prompt: &str) -> ChartResult<String> {
        self(prompt)
    }
}

/// Prompt asking for a title and business-style description of `document`.
pub fn build_prompt(kind: ChartKind, document: &ExportDocument) -> ChartResult<String> {
    let chart_name = match kind {
        ChartKind::Scatter => "Scatter Plot".to_owned(),
        ChartKind::Vertical | ChartKind::Horizontal => format!("{kind} Bar Chart"),
    };
    let dataset = document.to_json()?;
    Ok(format!(
        "Analyze the following dataset for a {chart_name}.\n\n\
         The dataset JSON below includes the axis labels ('xAxisLabel' and 'yAxisLabel') \
         and the data points.\n\
         The X-axis represents \"{x}\" and the Y-axis represents \"{y}\".\n\n\
         Please generate a suitable title and a business-style description of the patterns \
         found in this data.\n\n\
         Dataset:\n{dataset}",
        x = document.x_axis_label,
        y = document.y_axis_label,
    ))
}

/// Parses a `{ "title", "description" }` reply.
pub fn parse_analysis(text: &str) -> ChartResult<Analysis> {
    let analysis: Analysis = serde_json::from_str(text.trim())?;
    if analysis.title.trim().is_empty() {
        return Err(ChartError::Analysis("reply has an empty title".to_owned()));
    }
    Ok(analysis)
}

/// Runs one generation round. Never fails: errors become `Analysis::fallback`.
pub fn analyze<G>(generator: &G, kind: ChartKind, document: &ExportDocument) -> Analysis
where
    G: TextGenerator + ?Sized,
{
    let outcome = build_prompt(kind, document)
        .and_then(|prompt| generator.generate(&prompt))
        .and_then(|reply| parse_analysis(&reply));
    match outcome {
        Ok(analysis) => {
            debug!(%kind, points = document.points.len(), "dataset analysis ready");
            analysis
        }
        Err(err) => {
            warn!(%kind, error = %err, "dataset analysis failed, using fallback text");
            Analysis::fallback()
        }
    }
}

/// Analysis running on a background thread.
#[derive(Debug)]
pub struct AnalysisTask {
    handle: JoinHandle<Analysis>,
}

impl AnalysisTask {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the analysis is done. A panicking generator yields the
    /// fallback text.
    #[must_use]
    pub fn wait(self) -> Analysis {
        self.handle.join().unwrap_or_else(|_| {
            warn!("dataset analysis thread panicked, using fallback text");
            Analysis::fallback()
        })
    }
}

/// Starts `analyze` on its own thread; the document is moved in, so later
/// chart edits do not affect the request.
#[must_use]
pub fn spawn_analysis<G>(generator: G, kind: ChartKind, document: ExportDocument) -> AnalysisTask
where
    G: TextGenerator + 'static,
{
    let handle = thread::spawn(move || analyze(&generator, kind, &document));
    AnalysisTask { handle }
}
