//! Output page assembly
//!
//! A `PageBuilder` collects content operators and XObject references while
//! images are placed and decorations are drawn, and only becomes a PDF page
//! object once the document is finished.

use crate::constants::FONT_RESOURCE_NAME;
use crate::layout::Rect;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

#[derive(Debug, Clone)]
pub struct PageBuilder {
    width: f32,
    height: f32,
    content_ops: Vec<String>,
    xobjects: Dictionary,
}

impl PageBuilder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            content_ops: Vec::new(),
            xobjects: Dictionary::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Draw an image XObject stretched over `rect`
    pub fn place_image(&mut self, name: &str, xobject_id: ObjectId, rect: &Rect) {
        self.xobjects
            .set(name.as_bytes(), Object::Reference(xobject_id));
        self.content_ops.push(format!(
            "q {:.2} 0 0 {:.2} {:.2} {:.2} cm /{} Do Q\n",
            rect.width, rect.height, rect.x, rect.y, name
        ));
    }

    /// Append raw content stream operators
    pub fn push_op(&mut self, op: String) {
        self.content_ops.push(op);
    }

    pub fn content(&self) -> String {
        self.content_ops.join("")
    }

    /// Write the page and its content stream into `output`
    pub fn finish(
        self,
        output: &mut Document,
        parent_pages_id: ObjectId,
        font_id: ObjectId,
    ) -> ObjectId {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(parent_pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.width),
                Object::Real(self.height),
            ]),
        );

        let mut fonts = Dictionary::new();
        fonts.set(FONT_RESOURCE_NAME, Object::Reference(font_id));

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        if !self.xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(self.xobjects));
        }

        let content = self.content_ops.join("");
        let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        output.add_object(page_dict)
    }
}
