//! Serializes a [`LayoutedDocument`] to PDF 1.7.
//!
//! Text is set in the base-14 Helvetica faces with WinAnsi encoding, so no font program is
//! embedded. Content and image streams are zlib-compressed. The writer adds nothing
//! time-dependent beyond the document's own generation date, so identical input gives identical
//! bytes.

use crate::chart::ChartImage;
use crate::model::{ImageItem, LayoutedDocument, PT_PER_MM, PageItem, PageLayout, TextItem};
use crate::text::{FontWeight, LINE_HEIGHT_FACTOR};
use crate::{Error, Result};
use chrono::Datelike;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use std::io::Write as _;

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");
const PRODUCER: &str = "reqdoc";

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Maps text to WinAnsiEncoding (Windows-1252). Characters outside the code page become `?`.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => ch as u8,
            '\t' => b' ',
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}

struct ImageRefs {
    id: Ref,
    name: String,
}

/// Writes `document` as PDF. `charts` must be the list the document was laid out with.
pub fn write_pdf(document: &LayoutedDocument, charts: &[ChartImage]) -> Result<Vec<u8>> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();
    let info_id = alloc.bump();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let date = document.generated_on;
    pdf.document_info(info_id)
        .title(TextStr(&document.title))
        .producer(TextStr(PRODUCER))
        .creation_date(
            Date::new(u16::try_from(date.year()).unwrap_or(0))
                .month(date.month() as u8)
                .day(date.day() as u8),
        );

    let mut images = Vec::with_capacity(charts.len());
    for (i, chart) in charts.iter().enumerate() {
        images.push(write_image(&mut pdf, &mut alloc, chart, i)?);
    }

    let page_ids: Vec<Ref> = document.pages.iter().map(|_| alloc.bump()).collect();
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    let (width_pt, height_pt) = (
        document.geometry.width * PT_PER_MM,
        document.geometry.height * PT_PER_MM,
    );
    for (page, &page_id) in document.pages.iter().zip(&page_ids) {
        let content_id = alloc.bump();
        let content = page_content(page, document.geometry.height, &images, charts)?;
        let packed = compress(&content)?;
        pdf.stream(content_id, &packed).filter(Filter::FlateDecode);

        let mut writer = pdf.page(page_id);
        writer
            .media_box(Rect::new(0.0, 0.0, width_pt as f32, height_pt as f32))
            .parent(page_tree_id)
            .contents(content_id);

        let used: Vec<usize> = page.images().map(|image| image.asset).collect();
        let mut resources = writer.resources();
        resources
            .fonts()
            .pair(FONT_REGULAR, regular_id)
            .pair(FONT_BOLD, bold_id);
        if !used.is_empty() {
            let mut x_objects = resources.x_objects();
            for asset in used {
                let image = &images[asset];
                x_objects.pair(Name(image.name.as_bytes()), image.id);
            }
            x_objects.finish();
        }
        resources.finish();
        writer.finish();
    }

    tracing::debug!(pages = page_ids.len(), images = images.len(), "pdf written");
    Ok(pdf.finish())
}

fn write_image(
    pdf: &mut Pdf,
    alloc: &mut Ref,
    chart: &ChartImage,
    index: usize,
) -> Result<ImageRefs> {
    let id = alloc.bump();
    let pixels = chart.width() as usize * chart.height() as usize;
    let mut rgb = Vec::with_capacity(pixels * 3);
    let mut alpha = Vec::with_capacity(pixels);
    for px in chart.rgba().chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
        alpha.push(px[3]);
    }

    let mask_id = if chart.is_opaque() {
        None
    } else {
        let mask_id = alloc.bump();
        let packed_alpha = compress(&alpha)?;
        let mut mask = pdf.image_xobject(mask_id, &packed_alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(chart.width() as i32);
        mask.height(chart.height() as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask.finish();
        Some(mask_id)
    };

    let packed_rgb = compress(&rgb)?;
    let mut image = pdf.image_xobject(id, &packed_rgb);
    image.filter(Filter::FlateDecode);
    image.width(chart.width() as i32);
    image.height(chart.height() as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    if let Some(mask_id) = mask_id {
        image.s_mask(mask_id);
    }
    image.finish();

    Ok(ImageRefs {
        id,
        name: format!("Im{index}"),
    })
}

fn page_content(
    page: &PageLayout,
    page_height: f64,
    images: &[ImageRefs],
    charts: &[ChartImage],
) -> Result<Vec<u8>> {
    let mut content = Content::new();
    for item in &page.items {
        match item {
            PageItem::Text(text) => write_text(&mut content, text, page_height),
            PageItem::Image(image) => {
                let (Some(refs), Some(chart)) = (images.get(image.asset), charts.get(image.asset))
                else {
                    return Err(Error::InvalidImage {
                        kind: image.kind,
                        message: format!("layout references missing chart asset {}", image.asset),
                    });
                };
                if chart.kind() != image.kind {
                    return Err(Error::InvalidImage {
                        kind: image.kind,
                        message: format!("chart asset {} is a {} chart", image.asset, chart.kind()),
                    });
                }
                write_image_placement(&mut content, image, &refs.name, page_height);
            }
        }
    }
    Ok(content.finish())
}

fn write_text(content: &mut Content, item: &TextItem, page_height: f64) {
    let font = match item.style.font_weight {
        FontWeight::Normal => FONT_REGULAR,
        FontWeight::Bold => FONT_BOLD,
    };
    let size = item.style.font_size as f32;
    let leading = (item.style.font_size * LINE_HEIGHT_FACTOR) as f32;

    content.begin_text();
    content.set_font(font, size);
    content.next_line(
        (item.x * PT_PER_MM) as f32,
        ((page_height - item.y) * PT_PER_MM) as f32,
    );
    for (i, line) in item.lines.iter().enumerate() {
        if i > 0 {
            content.next_line(0.0, -leading);
        }
        content.show(Str(&encode_win_ansi(line)));
    }
    content.end_text();
}

fn write_image_placement(content: &mut Content, image: &ImageItem, name: &str, page_height: f64) {
    let w = image.width * PT_PER_MM;
    let h = image.height * PT_PER_MM;
    let x = image.x * PT_PER_MM;
    let y = (page_height - image.y - image.height) * PT_PER_MM;

    content.save_state();
    content.transform([w as f32, 0.0, 0.0, h as f32, x as f32, y as f32]);
    content.x_object(Name(name.as_bytes()));
    content.restore_state();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_ansi_keeps_latin1_and_maps_typographic_quotes() {
        assert_eq!(encode_win_ansi("Café"), b"Caf\xe9".to_vec());
        assert_eq!(encode_win_ansi("“TLS” – 1€"), b"\x93TLS\x94 \x96 1\x80".to_vec());
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn compressed_streams_inflate_back() {
        use flate2::read::ZlibDecoder;
        use std::io::Read as _;

        let data = b"BT /F1 10 Tf ET".repeat(20);
        let packed = compress(&data).unwrap();
        let mut out = Vec::new();
        ZlibDecoder::new(packed.as_slice())
            .read_to_end(&mut out)
            .unwrap();
        assert_eq!(out, data);
    }
}
