//! Page layout packer
//!
//! Owns the PDF document for the length of one export:
//! 1. Plan the pages from the image sizes
//! 2. Embed each image and draw it in its cell
//! 3. Decorate every finished page
//! 4. Serialize to bytes

use crate::constants::CAPTION_FONT_SIZE;
use crate::layout::{GridLayout, PagePlan, create_grid_layout, plan_pages};
use crate::options::{Decoration, PageGeometry};
use crate::render::{
    EmbeddedLogo, PageBuilder, centered_text_op, create_image_xobject, decorate_page,
    font_dictionary, truncate_to_width,
};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Lay out `images` on grid pages and return the serialized PDF.
///
/// Any embedding or serialization failure aborts the whole operation.
pub fn layout(
    images: Vec<ProcessedImage>,
    geometry: &PageGeometry,
    decoration: Decoration,
) -> Result<Vec<u8>> {
    let mut packer = Packer::new(geometry, decoration);
    packer.place_images(images)?;
    packer.decorate()?;
    packer.finish()
}

/// Document under construction
pub struct Packer {
    document: Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    geometry: PageGeometry,
    grid: GridLayout,
    decoration: Decoration,
    pages: Vec<PageBuilder>,
    decorated: bool,
}

impl Packer {
    pub fn new(geometry: &PageGeometry, decoration: Decoration) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let font_id = document.add_object(font_dictionary());
        let grid = create_grid_layout(geometry, decoration.has_header());

        Self {
            document,
            pages_id,
            font_id,
            geometry: *geometry,
            grid,
            decoration,
            pages: Vec::new(),
            decorated: false,
        }
    }

    pub fn grid(&self) -> &GridLayout {
        &self.grid
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Embed and place every image in input order.
    ///
    /// Each image's encoded bytes move into the document as it is embedded.
    /// An empty batch still produces one (blank) page.
    pub fn place_images(&mut self, images: Vec<ProcessedImage>) -> Result<()> {
        let dimensions: Vec<(u32, u32)> = images.iter().map(|i| (i.width, i.height)).collect();
        let plans = plan_pages(&dimensions, &self.grid, self.decoration.captions);

        let mut images: Vec<Option<ProcessedImage>> = images.into_iter().map(Some).collect();
        for plan in &plans {
            let page = self.render_page(plan, &mut images)?;
            self.pages.push(page);
        }

        log::debug!(
            "Placed {} images on {} pages ({} per page)",
            dimensions.len(),
            self.pages.len(),
            self.grid.capacity()
        );
        Ok(())
    }

    fn render_page(
        &mut self,
        plan: &PagePlan,
        images: &mut [Option<ProcessedImage>],
    ) -> Result<PageBuilder> {
        let mut page = PageBuilder::new(self.geometry.page_width, self.geometry.page_height);

        for placement in &plan.placements {
            let Some(image) = images
                .get_mut(placement.image_index)
                .and_then(Option::take)
            else {
                continue;
            };
            let caption = image.base_name();

            let xobject_name = format!("Im{}", placement.image_index);
            let xobject_id = create_image_xobject(&mut self.document, image)?;
            page.place_image(&xobject_name, xobject_id, &placement.image_rect);

            if let Some(band) = placement.caption {
                let text = truncate_to_width(&caption, CAPTION_FONT_SIZE, band.width);
                if !text.is_empty() {
                    let baseline = band.y + (band.height - CAPTION_FONT_SIZE) / 2.0;
                    page.push_op(centered_text_op(
                        band.center_x(),
                        baseline,
                        CAPTION_FONT_SIZE,
                        &text,
                    ));
                }
            }
        }

        Ok(page)
    }

    /// Decoration pass over every finished page; runs at most once
    pub fn decorate(&mut self) -> Result<()> {
        if self.decorated {
            return Ok(());
        }
        if self.pages.is_empty() {
            self.pages.push(PageBuilder::new(
                self.geometry.page_width,
                self.geometry.page_height,
            ));
        }

        let logo = match self.decoration.logo.take() {
            Some(logo) if self.decoration.has_header() => {
                let (width, height) = (logo.width, logo.height);
                let xobject_id = create_image_xobject(&mut self.document, logo)?;
                Some(EmbeddedLogo {
                    xobject_id,
                    width,
                    height,
                })
            }
            _ => None,
        };

        for (page_index, page) in self.pages.iter_mut().enumerate() {
            decorate_page(page, &self.decoration, logo, &self.geometry, page_index);
        }
        self.decorated = true;
        Ok(())
    }

    /// Assemble the page tree and serialize the document
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.decorate()?;

        let pages = std::mem::take(&mut self.pages);
        let page_count = pages.len();
        let mut kids = Vec::with_capacity(page_count);
        for page in pages {
            let page_id = page.finish(&mut self.document, self.pages_id, self.font_id);
            kids.push(Object::Reference(page_id));
        }

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(page_count as i64)),
        ]);
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.document.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.document.trailer.set("Root", catalog_id);

        let info_id = self.document.add_object(Dictionary::from_iter(vec![(
            "Producer",
            Object::string_literal(concat!("pdf-grid ", env!("CARGO_PKG_VERSION"))),
        )]));
        self.document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}
