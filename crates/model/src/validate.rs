//! Strict and lenient entry points, plus the schema declarations for the
//! document and every element tag.

use crate::document::Document;
use crate::element::{
    CalloutVariant, ChartOrientation, Element, ElementKind, KeyValueLayout, UnknownElement,
};
use crate::error::ValidationError;
use crate::path::JsonPath;
use crate::schema::{
    Field, Schema, UnionSchema, Variant, array_of, defaulted, integer_between, non_negative,
    number, object, optional, required, type_name, variant,
};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

const ALIGNMENTS: &[&str] = &["left", "center", "right", "justify"];
const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "none"];
const PAPER_SIZES: &[&str] = &["A3", "A4", "A5", "Letter", "Legal"];
const ORIENTATIONS: &[&str] = &["portrait", "landscape"];

// --- Shared pieces ---

fn margin_bottom() -> Field {
    optional("marginBottom", non_negative())
}

fn color(name: &'static str) -> Field {
    optional(name, Schema::String)
}

fn edges(name: &'static str) -> Schema {
    object(
        name,
        vec![
            required("top", non_negative()),
            required("right", non_negative()),
            required("bottom", non_negative()),
            required("left", non_negative()),
        ],
    )
}

fn border() -> Schema {
    object(
        "border",
        vec![
            defaulted("width", non_negative()),
            color("color"),
            defaulted("style", Schema::Enum(BORDER_STYLES)),
            optional("radius", non_negative()),
        ],
    )
}

fn chart_datum() -> Schema {
    object(
        "chart datum",
        vec![
            required("label", Schema::String),
            required("value", number()),
            color("color"),
        ],
    )
}

fn children() -> Schema {
    array_of(Schema::Lazy(element_schema))
}

fn table_rows_match_headers(value: &Value) -> Result<(), (JsonPath, String)> {
    let headers = value
        .get("headers")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    let rows = value.get("rows").and_then(Value::as_array);
    for (i, row) in rows.into_iter().flatten().enumerate() {
        let cells = row.as_array().map_or(0, Vec::len);
        if cells != headers {
            return Err((
                JsonPath::root().key("rows").index(i),
                format!("expected {} cells to match the headers, found {}", headers, cells),
            ));
        }
    }
    Ok(())
}

/// The element union. Nested children point back here through
/// [`Schema::Lazy`].
pub fn element_schema() -> Schema {
    let table = Variant {
        refine: Some(table_rows_match_headers),
        ..variant(
            "table",
            vec![
                required("headers", array_of(Schema::String)),
                required("rows", array_of(array_of(Schema::String))),
                optional(
                    "headerStyle",
                    object(
                        "headerStyle",
                        vec![
                            color("backgroundColor"),
                            color("color"),
                            optional("bold", Schema::Bool),
                        ],
                    ),
                ),
                optional(
                    "cellStyle",
                    object(
                        "cellStyle",
                        vec![
                            color("color"),
                            optional("fontSize", non_negative()),
                            color("borderColor"),
                        ],
                    ),
                ),
                color("alternateRowColor"),
                margin_bottom(),
            ],
        )
    };

    Schema::Union(UnionSchema {
        tag_field: "type",
        common: vec![optional("id", Schema::String)],
        variants: vec![
            variant(
                "section",
                vec![
                    optional("title", Schema::String),
                    required("children", children()),
                    color("backgroundColor"),
                    optional("padding", edges("padding")),
                    optional("border", border()),
                    margin_bottom(),
                ],
            ),
            variant(
                "columns",
                vec![
                    required(
                        "columns",
                        array_of(object(
                            "column",
                            vec![
                                required("width", non_negative()),
                                required("children", children()),
                            ],
                        )),
                    ),
                    optional("gap", non_negative()),
                    margin_bottom(),
                ],
            ),
            variant(
                "heading",
                vec![
                    required("level", integer_between(1, 6)),
                    required("content", Schema::String),
                    color("color"),
                    optional("align", Schema::Enum(ALIGNMENTS)),
                    margin_bottom(),
                ],
            ),
            variant(
                "paragraph",
                vec![
                    required("content", Schema::String),
                    color("color"),
                    optional("fontSize", non_negative()),
                    optional("align", Schema::Enum(ALIGNMENTS)),
                    margin_bottom(),
                ],
            ),
            variant(
                "list",
                vec![
                    defaulted("ordered", Schema::Bool),
                    required("items", array_of(Schema::String)),
                    color("color"),
                    margin_bottom(),
                ],
            ),
            variant(
                "caption",
                vec![
                    required("content", Schema::String),
                    color("color"),
                    optional("align", Schema::Enum(ALIGNMENTS)),
                    margin_bottom(),
                ],
            ),
            variant(
                "callout",
                vec![
                    required("variant", Schema::Enum(CalloutVariant::NAMES)),
                    required("content", Schema::String),
                    optional("title", Schema::String),
                    margin_bottom(),
                ],
            ),
            variant(
                "codeBlock",
                vec![
                    required("code", Schema::String),
                    optional("language", Schema::String),
                    defaulted("showLineNumbers", Schema::Bool),
                    margin_bottom(),
                ],
            ),
            table,
            variant(
                "keyValue",
                vec![
                    required(
                        "items",
                        array_of(object(
                            "keyValue item",
                            vec![
                                required("key", Schema::String),
                                required("value", Schema::String),
                            ],
                        )),
                    ),
                    defaulted("layout", Schema::Enum(KeyValueLayout::NAMES)),
                    margin_bottom(),
                ],
            ),
            variant(
                "barChart",
                vec![
                    required("data", array_of(chart_datum())),
                    optional("title", Schema::String),
                    defaulted("orientation", Schema::Enum(ChartOrientation::NAMES)),
                    optional("width", non_negative()),
                    optional("height", non_negative()),
                    defaulted("showValues", Schema::Bool),
                    optional("colors", array_of(Schema::String)),
                    margin_bottom(),
                ],
            ),
            variant(
                "pieChart",
                vec![
                    required("data", array_of(chart_datum())),
                    optional("title", Schema::String),
                    defaulted("donut", Schema::Bool),
                    defaulted("showLegend", Schema::Bool),
                    optional("width", non_negative()),
                    optional("height", non_negative()),
                    optional("colors", array_of(Schema::String)),
                    margin_bottom(),
                ],
            ),
            variant(
                "lineChart",
                vec![
                    required(
                        "series",
                        array_of(object(
                            "series",
                            vec![
                                required("label", Schema::String),
                                color("color"),
                                required(
                                    "values",
                                    array_of(object(
                                        "point",
                                        vec![required("x", number()), required("y", number())],
                                    )),
                                ),
                            ],
                        )),
                    ),
                    optional("title", Schema::String),
                    defaulted("showPoints", Schema::Bool),
                    defaulted("showGrid", Schema::Bool),
                    optional("width", non_negative()),
                    optional("height", non_negative()),
                    margin_bottom(),
                ],
            ),
            variant(
                "image",
                vec![
                    required("src", Schema::String),
                    optional("alt", Schema::String),
                    optional("width", non_negative()),
                    optional("height", non_negative()),
                    optional("align", Schema::Enum(ALIGNMENTS)),
                    margin_bottom(),
                ],
            ),
            variant(
                "divider",
                vec![
                    color("color"),
                    optional("thickness", non_negative()),
                    optional("style", Schema::Enum(BORDER_STYLES)),
                    margin_bottom(),
                ],
            ),
            variant(
                "spacer",
                vec![required("height", non_negative()), margin_bottom()],
            ),
            variant("pageBreak", vec![]),
        ],
    })
}

fn theme() -> Schema {
    object(
        "theme",
        vec![
            color("primaryColor"),
            color("secondaryColor"),
            color("accentColor"),
            color("textColor"),
            color("mutedColor"),
            color("backgroundColor"),
            optional("fontFamily", Schema::String),
        ],
    )
}

pub fn document_schema() -> Schema {
    object(
        "document",
        vec![
            required(
                "metadata",
                object(
                    "metadata",
                    vec![
                        required("title", Schema::String),
                        optional("author", Schema::String),
                        optional("subject", Schema::String),
                        optional("keywords", Schema::String),
                    ],
                ),
            ),
            defaulted(
                "pageSettings",
                object(
                    "pageSettings",
                    vec![
                        defaulted("paperSize", Schema::Enum(PAPER_SIZES)),
                        defaulted("orientation", Schema::Enum(ORIENTATIONS)),
                        defaulted("margins", edges("margins")),
                    ],
                ),
            ),
            defaulted("theme", theme()),
            optional(
                "header",
                object(
                    "header",
                    vec![
                        defaulted("enabled", Schema::Bool),
                        defaulted("content", children()),
                    ],
                ),
            ),
            optional(
                "footer",
                object(
                    "footer",
                    vec![
                        defaulted("enabled", Schema::Bool),
                        defaulted("content", children()),
                        optional("pageNumberTemplate", Schema::String),
                    ],
                ),
            ),
            required("content", children()),
        ],
    )
}

// --- Entry points ---

fn typed<'a, T: Deserialize<'a>>(value: &'a Value) -> Result<T, ValidationError> {
    T::deserialize(value).map_err(|e| ValidationError::at_root(e.to_string()))
}

/// Parses and validates a document from JSON text.
pub fn parse_document(json: &str) -> Result<Document, ValidationError> {
    let value: Value = serde_json::from_str(json)?;
    validate_document(&value)
}

/// Validates an untyped document and converts it to the typed model.
pub fn validate_document(value: &Value) -> Result<Document, ValidationError> {
    document_schema().check(value, &JsonPath::root())?;
    let doc: Document = typed(value)?;
    debug!(
        "Validated document '{}' with {} top-level elements",
        doc.metadata.title,
        doc.content.len()
    );
    Ok(doc)
}

/// Validates one element (and its subtree).
pub fn validate_element(value: &Value) -> Result<Element, ValidationError> {
    element_schema().check(value, &JsonPath::root())?;
    typed(value)
}

/// Loads a content array element by element. Elements that fail validation
/// become [`ElementKind::Unknown`] placeholders so their valid siblings
/// survive. Fails only when `value` is not an array.
pub fn load_content_lenient(value: &Value) -> Result<Vec<Element>, ValidationError> {
    let items = value.as_array().ok_or_else(|| {
        ValidationError::at_root(format!("expected array of elements, found {}", type_name(value)))
    })?;
    let schema = element_schema();
    let content_path = JsonPath::root().key("content");

    let elements = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = content_path.index(i);
            match schema.check(item, &path).and_then(|_| typed::<Element>(item)) {
                Ok(element) => element,
                Err(err) => {
                    warn!("Replacing invalid element with a placeholder: {}", err);
                    placeholder(item, err)
                }
            }
        })
        .collect();
    Ok(elements)
}

fn placeholder(item: &Value, err: ValidationError) -> Element {
    let id = item.get("id").and_then(Value::as_str).map(Into::into);
    let tag = item.get("type").and_then(Value::as_str).map(str::to_string);
    Element {
        id,
        kind: ElementKind::Unknown(UnknownElement {
            tag,
            reason: err.to_string(),
        }),
    }
}
