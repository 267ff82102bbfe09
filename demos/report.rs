//! Builds a small quarterly report and writes it to `report.pdf`.
//!
//! ```sh
//! RUST_LOG=info cargo run --example report
//! ```

use quire::{PrintPipelineBuilder, QuireError};
use serde_json::json;
use std::time::Duration;

fn main() -> Result<(), QuireError> {
    env_logger::init();

    let document = json!({
        "metadata": { "title": "Quarterly Report", "author": "Finance" },
        "pageSettings": { "paperSize": "A4", "orientation": "portrait" },
        "theme": { "primaryColor": "#1d4ed8", "fontFamily": "Georgia, serif" },
        "header": { "enabled": true, "content": [
            { "type": "caption", "content": "ACME Corp · Internal", "align": "right" }
        ]},
        "footer": { "enabled": true, "pageNumberTemplate": "Page {page} of {total}" },
        "content": [
            { "type": "heading", "level": 1, "content": "Q3 Results" },
            { "type": "paragraph", "content": "Revenue grew **12%** over the previous quarter. See [the dashboard](https://example.com/q3) for detail." },
            { "type": "keyValue", "items": [
                { "key": "Revenue", "value": "$4.2M" },
                { "key": "Margin", "value": "31%" }
            ]},
            { "type": "barChart", "title": "Revenue by region", "data": [
                { "label": "North", "value": 1.6 },
                { "label": "South", "value": 1.1 },
                { "label": "West", "value": 1.5 }
            ]},
            { "type": "pageBreak" },
            { "type": "section", "title": "Appendix", "children": [
                { "type": "table", "headers": ["Month", "Revenue"], "rows": [
                    ["July", "$1.3M"], ["August", "$1.4M"], ["September", "$1.5M"]
                ]}
            ]}
        ]
    });

    let runtime = tokio::runtime::Runtime::new()?;
    let pipeline = PrintPipelineBuilder::new()
        .with_timeout(Duration::from_secs(10))
        .build()?;
    let bytes = runtime.block_on(pipeline.generate_json(&document))?;

    std::fs::write("report.pdf", &bytes)?;
    println!("Wrote report.pdf ({} bytes)", bytes.len());
    Ok(())
}
