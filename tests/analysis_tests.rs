use std::sync::{Arc, Mutex};

use chart_vibe::analysis::{Analysis, TextGenerator, analyze, spawn_analysis};
use chart_vibe::api::ChartKind;
use chart_vibe::core::{BarEntry, ChartDataset};
use chart_vibe::error::{ChartError, ChartResult};
use chart_vibe::export::ExportDocument;

fn document() -> ExportDocument {
    ExportDocument::new(
        ChartDataset::Bar(vec![
            BarEntry::new("Sales", 400.0),
            BarEntry::new("Support", 100.0),
        ]),
        "Categories",
        "Value",
    )
}

/// Replies with a canned text and remembers the prompt it was given.
struct CannedGenerator {
    reply: ChartResult<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl TextGenerator for CannedGenerator {
    fn generate(&self, prompt: &str) -> ChartResult<String> {
        self.prompts
            .lock()
            .expect("prompt log")
            .push(prompt.to_owned());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(err) => Err(ChartError::Analysis(err.to_string())),
        }
    }
}

#[test]
fn successful_reply_is_parsed() {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let generator = CannedGenerator {
        reply: Ok(r#"{"title":"Sales dominate","description":"Most budget goes to sales."}"#
            .to_owned()),
        prompts: Arc::clone(&prompts),
    };

    let analysis = analyze(&generator, ChartKind::Vertical, &document());
    assert_eq!(
        analysis,
        Analysis {
            title: "Sales dominate".to_owned(),
            description: "Most budget goes to sales.".to_owned(),
        }
    );
    let prompts = prompts.lock().expect("prompt log");
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("vertical Bar Chart"));
    assert!(prompts[0].contains("\"yAxisLabel\": \"Value\""));
}

#[test]
fn generator_errors_and_bad_replies_fall_back() {
    let failing = |_: &str| -> ChartResult<String> {
        Err(ChartError::Analysis("quota exceeded".to_owned()))
    };
    assert!(analyze(&failing, ChartKind::Scatter, &document()).is_fallback());

    let garbled = |_: &str| -> ChartResult<String> { Ok("I think it's about sales".to_owned()) };
    let analysis = analyze(&garbled, ChartKind::Horizontal, &document());
    assert_eq!(analysis, Analysis::fallback());
    assert_eq!(analysis.title, "Analysis Failed");
}

#[test]
fn background_task_yields_the_analysis() {
    let generator = |_: &str| -> ChartResult<String> {
        Ok(r#"{"title":"Even split","description":"Two categories."}"#.to_owned())
    };
    let task = spawn_analysis(generator, ChartKind::Vertical, document());
    let analysis = task.wait();
    assert_eq!(analysis.title, "Even split");
}

#[test]
fn panicking_generator_yields_the_fallback() {
    let generator = |_: &str| -> ChartResult<String> { panic!("generator crashed") };
    let task = spawn_analysis(generator, ChartKind::Scatter, document());
    assert!(task.wait().is_fallback());
}
