//! Decoration pass
//!
//! Runs once per finished page, after every image is placed. Draws the
//! footer, the header with its optional logo, and the page number.

use crate::constants::*;
use crate::layout::Rect;
use crate::options::{Decoration, PageGeometry};
use lopdf::ObjectId;

use super::page::PageBuilder;
use super::text::{centered_text_op, right_aligned_text_op, text_op, text_width};

/// Resource name of the logo XObject on every page that shows it
const LOGO_RESOURCE_NAME: &str = "Logo";

/// Embedded logo and its pixel size
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedLogo {
    pub xobject_id: ObjectId,
    pub width: u32,
    pub height: u32,
}

/// Decorate one page.
///
/// # Arguments
/// * `page` - The page to draw on
/// * `decoration` - Header, footer and numbering settings
/// * `logo` - The embedded logo, if any
/// * `geometry` - Page geometry, for the right padding
/// * `page_index` - Zero-based index of the page in the document
pub fn decorate_page(
    page: &mut PageBuilder,
    decoration: &Decoration,
    logo: Option<EmbeddedLogo>,
    geometry: &PageGeometry,
    page_index: usize,
) {
    let center_x = page.width() / 2.0;

    if decoration.has_footer() {
        let footer = decoration.footer.trim();
        page.push_op(centered_text_op(
            center_x,
            FOOTER_BOTTOM_OFFSET,
            FOOTER_FONT_SIZE,
            footer,
        ));
    }

    if decoration.has_header() {
        draw_header(page, decoration.header.trim(), logo);
    }

    let page_number = decoration
        .starting_page_number
        .saturating_add(page_index)
        .to_string();
    page.push_op(right_aligned_text_op(
        page.width() - geometry.right_pad,
        FOOTER_BOTTOM_OFFSET,
        PAGE_NUMBER_FONT_SIZE,
        &page_number,
    ));
}

/// Header text centered near the top, with the logo to its left.
///
/// The logo and the text are centered together as one group.
fn draw_header(page: &mut PageBuilder, header: &str, logo: Option<EmbeddedLogo>) {
    let baseline = page.height() - HEADER_TOP_OFFSET;
    let header_width = text_width(header, HEADER_FONT_SIZE);

    let Some(logo) = logo.filter(|logo| logo.width > 0 && logo.height > 0) else {
        page.push_op(centered_text_op(
            page.width() / 2.0,
            baseline,
            HEADER_FONT_SIZE,
            header,
        ));
        return;
    };

    let logo_height = HEADER_FONT_SIZE * LOGO_HEIGHT_FACTOR;
    let logo_width = logo_height * logo.width as f32 / logo.height as f32;
    let group_width = logo_width + LOGO_GAP + header_width;
    let start_x = (page.width() - group_width) / 2.0;

    // Vertically center the logo on the cap height of the text
    let text_middle = baseline + HEADER_FONT_SIZE * 0.35;
    let logo_rect = Rect::new(
        start_x,
        text_middle - logo_height / 2.0,
        logo_width,
        logo_height,
    );
    page.place_image(LOGO_RESOURCE_NAME, logo.xobject_id, &logo_rect);
    page.push_op(text_op(
        start_x + logo_width + LOGO_GAP,
        baseline,
        HEADER_FONT_SIZE,
        header,
    ));
}
