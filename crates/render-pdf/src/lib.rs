//! Print back-end.
//!
//! [`print_table`] projects a document onto [`PrintNode`]s: styled boxes,
//! text blocks, tables and vector drawings with every color resolved. An
//! [`ArtifactProducer`] then paginates that tree and writes the artifact;
//! [`LopdfProducer`] is the built-in PDF writer.

mod canvas;
mod draw;
mod error;
mod fonts;
mod layout;
mod node;
mod producer;
mod project;
mod shapes;

pub use canvas::{LinkArea, PageCanvas, flip_y};
pub use error::{ProducerError, RenderError};
pub use fonts::{styled_font_name, text_width};
pub use node::{
    BoxBorder, DocumentInfo, Drawing, FontFamily, PrintBlock, PrintColumn, PrintDocument, PrintKind,
    PrintNode, PrintRow, PrintTable, Rule, Shape, TextAnchor, TextBlock, TextRun,
};
pub use producer::{ArtifactProducer, LopdfProducer, paginate, write_pdf};
pub use project::inline_runs;

use quire_model::Document;
use quire_render_core::{DispatchTable, RenderContext, ResolvedTheme, ThemeDefaults, project};

/// The print renderer for every element tag.
pub fn print_table() -> DispatchTable<PrintNode> {
    DispatchTable {
        section: project::section,
        columns: project::columns,
        heading: project::heading,
        paragraph: project::paragraph,
        list: project::list,
        caption: project::caption,
        callout: project::callout,
        code_block: project::code_block,
        table: project::table,
        key_value: project::key_value,
        bar_chart: shapes::bar_chart,
        pie_chart: shapes::pie_chart,
        line_chart: shapes::line_chart,
        image: project::image,
        divider: project::divider,
        spacer: project::spacer,
        page_break: project::page_break,
        unknown: project::unknown,
    }
}

/// Projects a document for print: body, enabled header and footer, page
/// geometry and document info.
///
/// The document is expected to be sanitized already; see
/// [`Document::sanitized_for_print`].
pub fn project_document(doc: &Document) -> PrintDocument {
    let theme = ResolvedTheme::resolve(&doc.theme, &ThemeDefaults::default());
    let width = doc.page_settings.content_width();
    let ctx = RenderContext::root(&theme, width);
    let table = print_table();

    let header = doc
        .enabled_header()
        .map(|h| project(&h.content, &ctx, &table))
        .unwrap_or_default();
    let footer = doc.enabled_footer();

    PrintDocument {
        info: DocumentInfo {
            title: doc.metadata.title.clone(),
            author: doc.metadata.author.clone(),
            subject: doc.metadata.subject.clone(),
            keywords: doc.metadata.keywords.clone(),
        },
        page_size: doc.page_settings.page_size(),
        margins: doc.page_settings.margins,
        header,
        footer: footer
            .map(|f| project(&f.content, &ctx, &table))
            .unwrap_or_default(),
        page_number_template: footer.and_then(|f| f.page_number_template.clone()),
        footer_color: theme.muted,
        family: project::family(&ctx),
        body: project(&doc.content, &ctx, &table),
    }
}
