//! Builds small synthetic PDFs with ruled tables for tests.
//!
//! Shared with the integration tests, which include this file by path.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// Codes assigned to the Polish letters through the font's `Differences`.
const POLISH: [(char, u8, &str); 9] = [
    ('ą', 161, "aogonek"),
    ('ć', 162, "cacute"),
    ('ę', 163, "eogonek"),
    ('ł', 164, "lslash"),
    ('ń', 165, "nacute"),
    ('ś', 166, "sacute"),
    ('ź', 167, "zacute"),
    ('ż', 168, "zdotaccent"),
    ('ó', 0xF3, "oacute"),
];

/// Width of every glyph of the test font, in text space thousandths.
const GLYPH_WIDTH: i64 = 556;

#[derive(Default)]
struct PageOps {
    /// One entry per content stream; more than one makes `Contents` an array.
    streams: Vec<Vec<Operation>>,
    forms: Vec<Vec<Operation>>,
}

pub(crate) struct TestPage {
    pages: Vec<PageOps>,
}

impl TestPage {
    pub fn new() -> Self {
        Self {
            pages: vec![PageOps {
                streams: vec![Vec::new()],
                forms: Vec::new(),
            }],
        }
    }

    fn page(&mut self) -> &mut PageOps {
        if self.pages.is_empty() {
            self.pages.push(PageOps::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        let page = self.page();
        if page.streams.is_empty() {
            page.streams.push(Vec::new());
        }
        if let Some(ops) = page.streams.last_mut() {
            ops.push(Operation::new(operator, operands));
        }
    }

    /// Full grid: a horizontal rule at every `y`, a vertical one at every `x`.
    pub fn grid(mut self, xs: &[i64], ys: &[i64]) -> Self {
        let (left, right) = (xs[0], xs[xs.len() - 1]);
        let (top, bottom) = (ys[0], ys[ys.len() - 1]);
        for &y in ys {
            self = self.line(left, y, right, y);
        }
        for &x in xs {
            self = self.line(x, top, x, bottom);
        }
        self
    }

    /// The same grid as [`TestPage::grid`], painted as one-unit filled
    /// rectangles instead of stroked lines.
    pub fn filled_grid(mut self, xs: &[i64], ys: &[i64]) -> Self {
        let (left, right) = (xs[0], xs[xs.len() - 1]);
        let (top, bottom) = (ys[0], ys[ys.len() - 1]);
        for &y in ys {
            self = self.fill_rect(left, y, right - left, 1);
        }
        for &x in xs {
            self = self.fill_rect(x, bottom, 1, top - bottom);
        }
        self
    }

    pub fn line(mut self, x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        self.push("m", ints(&[x0, y0]));
        self.push("l", ints(&[x1, y1]));
        self.push("S", vec![]);
        self
    }

    pub fn fill_rect(mut self, x: i64, y: i64, w: i64, h: i64) -> Self {
        self.push("re", ints(&[x, y, w, h]));
        self.push("f", vec![]);
        self
    }

    pub fn text(self, x: i64, y: i64, s: &str) -> Self {
        self.text_lines(x, y, &[s])
    }

    /// Lines 12 units apart, drawn with `T*`.
    pub fn text_lines(mut self, x: i64, y: i64, lines: &[&str]) -> Self {
        self.push("BT", vec![]);
        self.push("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(10)]);
        self.push("TL", ints(&[12]));
        self.push("Td", ints(&[x, y]));
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.push("T*", vec![]);
            }
            self.push("Tj", vec![Object::String(encode(line), StringFormat::Literal)]);
        }
        self.push("ET", vec![]);
        self
    }

    /// Draws whatever `draw` adds into a form XObject `FmN` and paints it
    /// on the current page with `q /FmN Do Q`.
    pub fn form(mut self, draw: impl FnOnce(Self) -> Self) -> Self {
        let drawn = draw(Self::new());
        let operations: Vec<Operation> = drawn
            .pages
            .into_iter()
            .flat_map(|page| page.streams)
            .flatten()
            .collect();
        let page = self.page();
        page.forms.push(operations);
        let name = format!("Fm{}", page.forms.len());
        self.push("q", vec![]);
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
        self
    }

    /// Starts a new content stream on the current page.
    pub fn split_contents(mut self) -> Self {
        self.page().streams.push(Vec::new());
        self
    }

    pub fn next_page(mut self) -> Self {
        self.pages.push(PageOps {
            streams: vec![Vec::new()],
            forms: Vec::new(),
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = add_font(&mut doc);

        let mut kids: Vec<Object> = Vec::new();
        for page in self.pages {
            let mut xobjects = Dictionary::new();
            for (i, operations) in page.forms.into_iter().enumerate() {
                let form = Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Form",
                        "BBox" => ints(&[0, 0, 595, 842]),
                        "Resources" => dictionary! {
                            "Font" => dictionary! { "F1" => font_id },
                        },
                    },
                    encode_content(operations),
                );
                xobjects.set(format!("Fm{}", i + 1), doc.add_object(form));
            }

            let contents: Vec<Object> = page
                .streams
                .into_iter()
                .map(|operations| doc.add_object(Stream::new(dictionary! {}, encode_content(operations))).into())
                .collect();
            let contents = match <[Object; 1]>::try_from(contents) {
                Ok([single]) => single,
                Err(many) => Object::Array(many),
            };

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => contents,
                "MediaBox" => ints(&[0, 0, 595, 842]),
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                    "XObject" => xobjects,
                },
            });
            kids.push(page_id.into());
        }

        let count = i64::try_from(kids.len()).expect("page count fits i64");
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).expect("serialize test PDF");
        out
    }
}

/// Helvetica with WinAnsi codes, the Polish letters mapped through
/// `Differences`, and explicit widths.
fn add_font(doc: &mut Document) -> ObjectId {
    let mut differences: Vec<Object> = Vec::new();
    for (_, code, name) in POLISH.iter().filter(|(_, code, _)| *code < 0xF0) {
        differences.push(Object::Integer(i64::from(*code)));
        differences.push(Object::Name(name.as_bytes().to_vec()));
    }
    let widths: Vec<Object> = (32..=255).map(|_| Object::Integer(GLYPH_WIDTH)).collect();
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "FirstChar" => 32_i64,
        "LastChar" => 255_i64,
        "Widths" => widths,
        "Encoding" => dictionary! {
            "Type" => "Encoding",
            "BaseEncoding" => "WinAnsiEncoding",
            "Differences" => differences,
        },
    })
}

fn encode_content(operations: Vec<Operation>) -> Vec<u8> {
    Content { operations }.encode().expect("encode content stream")
}

fn ints(values: &[i64]) -> Vec<Object> {
    values.iter().map(|v| Object::Integer(*v)).collect()
}

/// Encodes `s` for the test font: ASCII as is, Polish letters via `POLISH`.
fn encode(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|ch| {
            if ch.is_ascii() {
                u8::try_from(ch).ok()
            } else {
                POLISH.iter().find(|(c, _, _)| *c == ch).map(|(_, code, _)| *code)
            }
        })
        .collect()
}
