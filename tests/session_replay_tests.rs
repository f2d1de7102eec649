use std::cell::RefCell;
use std::rc::Rc;

use chart_vibe::api::{ChartConfig, ChartHost, ChartStyle};
use chart_vibe::core::{BarEntry, ChartDataset, Viewport};
use chart_vibe::export::ExportFormat;
use chart_vibe::interaction::PointerEvent;
use chart_vibe::render::SvgRenderer;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Session {
    config: ChartConfig,
    viewport: Viewport,
    events: Vec<PointerEvent>,
}

fn load_session() -> Session {
    serde_json::from_str(include_str!("fixtures/bar_budget_session.json")).expect("session json")
}

#[test]
fn recorded_session_replays_to_the_expected_dataset() {
    let session = load_session();
    let totals = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&totals);
    let mut host = ChartHost::new(session.config, ChartStyle::default(), |_| {
        Ok(SvgRenderer::new())
    })
    .expect("host")
    .with_sum_listener(move |total| sink.borrow_mut().push(total));
    host.resize(session.viewport).expect("resize");

    for event in &session.events {
        host.handle_pointer(*event).expect("replay event");
    }

    // y 384 and 332 map to 300 and 400 on the 520 px tall plot; the drag into
    // the R&D band leaves Marketing alone and the last bar gets what the
    // 1000 budget leaves.
    assert_eq!(
        host.data(),
        Some(ChartDataset::Bar(vec![
            BarEntry::new("Sales", 400.0),
            BarEntry::new("Marketing", 400.0),
            BarEntry::new("R&D", 200.0),
            BarEntry::new("Support", 0.0),
        ]))
    );
    assert_eq!(*totals.borrow(), vec![300.0, 400.0, 800.0, 1000.0, 1000.0]);

    let document = host.export_document().expect("document");
    let csv = document.render(ExportFormat::Csv).expect("csv");
    assert_eq!(
        csv,
        "Department,Budget\n\"Sales\",400\n\"Marketing\",400\n\"R&D\",200\n\"Support\",0"
    );
}
