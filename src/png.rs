//! PNG rendering of the compacted week.
//!
//! One row per weekday and one column per slot, with the slot start times
//! across the top and the day names down the side. Course spans are solid
//! blocks in their course colour labelled with course ID and classroom; a
//! slot with overlapping courses is split into horizontal stripes, one per
//! course.

use std::io::Cursor;

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{ImageFormat, Rgb, RgbImage};
use timetable_core::color::course_color;
use timetable_core::export::ImageRenderer;
use timetable_core::time_slot::slot_header;
use timetable_core::{ClassEntry, Span, TimetableError, TimetableResult, WeekView};

const BACKGROUND: Rgb<u8> = Rgb([0x0f, 0x17, 0x2a]);
const HEADER: Rgb<u8> = Rgb([0x1e, 0x29, 0x3b]);
const GRID: Rgb<u8> = Rgb([0x33, 0x41, 0x55]);
const TEXT: Rgb<u8> = Rgb([0xf8, 0xfa, 0xfc]);

/// Sizes at a pixel ratio of 1.
const GLYPH: u32 = 8;
const PAD: u32 = 4;
const LINE_GAP: u32 = 2;
const DAY_COLUMN: u32 = 80;
const SLOT_COLUMN: u32 = 72;
const HEADER_ROW: u32 = GLYPH + 2 * PAD;
const DAY_ROW: u32 = 2 * GLYPH + LINE_GAP + 2 * PAD + 2;
const GAP: u32 = 1;

/// Largest width or height the renderer will allocate.
const MAX_DIMENSION: u64 = 16_384;

pub struct PngRenderer;

struct Layout {
    scale: u32,
    width: u32,
    height: u32,
}

impl Layout {
    fn new(slots: usize, rows: usize, pixel_ratio: u32) -> TimetableResult<Self> {
        let scale = pixel_ratio.max(1);
        let width = scaled(DAY_COLUMN, slots, SLOT_COLUMN, scale);
        let height = scaled(HEADER_ROW, rows, DAY_ROW, scale);

        match (width, height) {
            (Some(width), Some(height)) => Ok(Layout {
                scale,
                width,
                height,
            }),
            _ => Err(TimetableError::Export(format!(
                "Image for {slots} slots and {rows} days at pixel ratio {pixel_ratio} exceeds {MAX_DIMENSION}px"
            ))),
        }
    }

    fn px(&self, units: u32) -> u32 {
        units * self.scale
    }

    fn slot_x(&self, slot: usize) -> u32 {
        self.px(DAY_COLUMN + slot as u32 * SLOT_COLUMN)
    }

    fn row_y(&self, row: usize) -> u32 {
        self.px(HEADER_ROW + row as u32 * DAY_ROW)
    }
}

/// `(fixed + count * each) * scale`, or None past MAX_DIMENSION.
fn scaled(fixed: u32, count: usize, each: u32, scale: u32) -> Option<u32> {
    let units = u64::try_from(count)
        .ok()?
        .checked_mul(u64::from(each))?
        .checked_add(u64::from(fixed))?;
    let pixels = units.checked_mul(u64::from(scale))?;
    if pixels > MAX_DIMENSION {
        return None;
    }
    u32::try_from(pixels).ok()
}

fn fill(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

/// Draw `text` with its top-left corner at `(x, y)`, stopping before `max_x`.
fn draw_text(img: &mut RgbImage, layout: &Layout, x: u32, y: u32, max_x: u32, text: &str) {
    let advance = layout.px(GLYPH);
    let mut cursor = x;

    for c in text.chars() {
        if cursor + advance > max_x {
            break;
        }
        if let Some(glyph) = BASIC_FONTS.get(c) {
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH {
                    if bits & (1u8 << col) == 0 {
                        continue;
                    }
                    let px = cursor + layout.px(col);
                    let py = y + layout.px(row as u32);
                    fill(img, px, py, px + layout.scale, py + layout.scale, TEXT);
                }
            }
        }
        cursor += advance;
    }
}

/// Second label line of a single-course block.
fn room_label(entry: &ClassEntry) -> String {
    if entry.class_type == "class" {
        entry.classroom.clone()
    } else {
        format!("{} {}", entry.classroom, entry.class_type.to_uppercase())
    }
}

fn draw_span(img: &mut RgbImage, layout: &Layout, row: usize, span: &Span) {
    if span.is_empty() {
        return;
    }

    let gap = layout.px(GAP);
    let pad = layout.px(PAD);
    let x0 = layout.slot_x(span.start) + gap;
    let x1 = layout.slot_x(span.end()) - gap;
    let y0 = layout.row_y(row) + gap;
    let y1 = layout.row_y(row + 1) - gap;

    if let Some(entry) = span.single() {
        fill(img, x0, y0, x1, y1, Rgb(course_color(&entry.course_id).rgb()));
        draw_text(img, layout, x0 + pad, y0 + pad, x1 - pad, &entry.course_id);
        let second_line = y0 + pad + layout.px(GLYPH + LINE_GAP);
        draw_text(img, layout, x0 + pad, second_line, x1 - pad, &room_label(entry));
        return;
    }

    let stripes = span.entries.len() as u32;
    let stripe_height = (y1 - y0) / stripes;

    for (i, entry) in span.entries.iter().enumerate() {
        let top = y0 + i as u32 * stripe_height;
        let bottom = if i as u32 == stripes - 1 { y1 } else { top + stripe_height };
        fill(img, x0, top, x1, bottom, Rgb(course_color(&entry.course_id).rgb()));

        if bottom - top >= layout.px(GLYPH + LINE_GAP) {
            let text_y = top + (bottom - top - layout.px(GLYPH)) / 2;
            draw_text(img, layout, x0 + pad, text_y, x1 - pad, &entry.course_id);
        }
    }
}

impl ImageRenderer for PngRenderer {
    fn render(&self, view: &WeekView<'_>, pixel_ratio: u32) -> TimetableResult<Vec<u8>> {
        let layout = Layout::new(view.slots.len(), view.rows.len(), pixel_ratio)?;
        let (width, height) = (layout.width, layout.height);
        let pad = layout.px(PAD);

        let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

        fill(&mut img, 0, 0, width, layout.row_y(0), HEADER);
        fill(&mut img, 0, 0, layout.px(DAY_COLUMN), height, HEADER);

        for slot in 0..=view.slots.len() {
            let x = layout.slot_x(slot);
            fill(&mut img, x, 0, x + layout.scale, height, GRID);
        }

        for (i, slot) in view.slots.iter().enumerate() {
            let x = layout.slot_x(i) + pad;
            draw_text(&mut img, &layout, x, pad, layout.slot_x(i + 1), slot_header(slot));
        }

        for (row_index, row) in view.rows.iter().enumerate() {
            let y = layout.row_y(row_index) + layout.px(DAY_ROW - GLYPH) / 2;
            draw_text(&mut img, &layout, pad, y, layout.px(DAY_COLUMN), row.day.as_str());

            for span in &row.spans {
                draw_span(&mut img, &layout, row_index, span);
            }
        }

        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| TimetableError::Export(format!("PNG encoding failed: {e}")))?;
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "png"
    }
}
