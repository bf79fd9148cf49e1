//! Display-Layout (128x64, monochrom)
//!
//! Zeichnet Kanalname, Zahlenwert und einen proportionalen Balken auf
//! jedes `DrawTarget` mit `BinaryColor`.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{
        MonoTextStyle, MonoTextStyleBuilder,
        ascii::{FONT_8X13_BOLD, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::{Baseline, Text},
};
use heapless::String;

use crate::logic::bar_width;
use crate::types::{Channel, PotValue};

pub const LABEL_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyleBuilder::new()
    .font(&FONT_8X13_BOLD)
    .text_color(BinaryColor::On)
    .build();

pub const VALUE_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyleBuilder::new()
    .font(&FONT_10X20)
    .text_color(BinaryColor::On)
    .build();

pub const OUTER_RECT_STYLE: PrimitiveStyle<BinaryColor> = PrimitiveStyleBuilder::new()
    .stroke_color(BinaryColor::On)
    .stroke_width(1)
    .fill_color(BinaryColor::Off)
    .build();

pub const FILL_RECT_STYLE: PrimitiveStyle<BinaryColor> = PrimitiveStyleBuilder::new()
    .fill_color(BinaryColor::On)
    .build();

const LABEL_ORIGIN: Point = Point::new(0, 0);
const VALUE_ORIGIN: Point = Point::new(0, 18);
const BAR_ORIGIN: Point = Point::new(0, 46);
const BAR_SIZE: Size = Size::new(128, 16);
/// Abstand zwischen Rahmen und Füllung
const BAR_PADDING: u32 = 2;

/// Zeichnet den ausgewählten Kanal komplett neu
pub fn render<T>(target: &mut T, channel: Channel, value: PotValue) -> Result<(), T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    Text::with_baseline(channel.label(), LABEL_ORIGIN, LABEL_STYLE, Baseline::Top).draw(target)?;

    // "100" plus Reserve
    let mut number: String<4> = String::new();
    let written = write!(number, "{}", value.get());
    debug_assert!(written.is_ok());
    Text::with_baseline(&number, VALUE_ORIGIN, VALUE_STYLE, Baseline::Top).draw(target)?;

    Rectangle::new(BAR_ORIGIN, BAR_SIZE)
        .into_styled(OUTER_RECT_STYLE)
        .draw(target)?;

    let fill = bar_width(value, BAR_SIZE.width - 2 * BAR_PADDING);
    if fill > 0 {
        let offset = Point::new(BAR_PADDING as i32, BAR_PADDING as i32);
        Rectangle::new(
            BAR_ORIGIN + offset,
            Size::new(fill, BAR_SIZE.height - 2 * BAR_PADDING),
        )
        .into_styled(FILL_RECT_STYLE)
        .draw(target)?;
    }

    Ok(())
}
