//! Commonly used units
//!
//! Each unit is built once on first access and shared afterwards. Relative
//! units with the identity scale (meter, second, newton, ...) also seed
//! [`UnitRegistry::with_standard_units`](crate::unit::UnitRegistry::with_standard_units),
//! so a product such as `m * m` resolves to [`SQUARE_METER`] rather than to an
//! anonymous derived unit.

use crate::unit::definition::{Unit, UnitRef};
use crate::unit::dimensions::SiDimensions;
use crate::unit::scale::Scale;
use std::sync::{Arc, LazyLock};

// Signatures of the derived quantities in the catalog
const AREA: SiDimensions = SiDimensions::new([2, 0, 0, 0, 0, 0, 0, 0]);
const VOLUME: SiDimensions = SiDimensions::new([3, 0, 0, 0, 0, 0, 0, 0]);
const SPEED: SiDimensions = SiDimensions::new([1, 0, -1, 0, 0, 0, 0, 0]);
const ACCELERATION: SiDimensions = SiDimensions::new([1, 0, -2, 0, 0, 0, 0, 0]);
const FORCE: SiDimensions = SiDimensions::new([1, 1, -2, 0, 0, 0, 0, 0]);
const ENERGY: SiDimensions = SiDimensions::new([2, 1, -2, 0, 0, 0, 0, 0]);
const POWER: SiDimensions = SiDimensions::new([2, 1, -3, 0, 0, 0, 0, 0]);
const FREQUENCY: SiDimensions = SiDimensions::new([0, 0, -1, 0, 0, 0, 0, 0]);

/// Standard gravity in m/s², used by kilogram-force
const STANDARD_GRAVITY: f64 = 9.80665;

fn relative(
    name: &'static str,
    abbreviation: &'static str,
    quantity: &'static str,
    dimensions: SiDimensions,
    scale: Scale,
) -> UnitRef {
    Arc::new(Unit::relative(name, abbreviation, quantity, dimensions, scale))
}

fn absolute(
    name: &'static str,
    abbreviation: &'static str,
    quantity: &'static str,
    scale: Scale,
    relative: &LazyLock<UnitRef>,
) -> UnitRef {
    Arc::new(Unit::absolute(
        name,
        abbreviation,
        quantity,
        scale,
        UnitRef::clone(relative),
    ))
}

// ---------------------------------------------------------------------------
// Dimensionless
// ---------------------------------------------------------------------------

pub static SI: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("dimensionless", "", "Dimensionless", SiDimensions::DIMENSIONLESS, Scale::IDENTITY)
});
pub static PERCENT: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("percent", "%", "Dimensionless", SiDimensions::DIMENSIONLESS, Scale::linear(0.01))
});

// ---------------------------------------------------------------------------
// Length and position
// ---------------------------------------------------------------------------

pub static METER: LazyLock<UnitRef> =
    LazyLock::new(|| relative("meter", "m", "Length", SiDimensions::LENGTH, Scale::IDENTITY));
pub static KILOMETER: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("kilometer", "km", "Length", SiDimensions::LENGTH, Scale::linear(1000.0))
});
pub static MILLIMETER: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("millimeter", "mm", "Length", SiDimensions::LENGTH, Scale::linear(0.001))
});
pub static FOOT: LazyLock<UnitRef> =
    LazyLock::new(|| relative("foot", "ft", "Length", SiDimensions::LENGTH, Scale::linear(0.3048)));
pub static INCH: LazyLock<UnitRef> =
    LazyLock::new(|| relative("inch", "in", "Length", SiDimensions::LENGTH, Scale::linear(0.0254)));
pub static MILE: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("mile", "mi", "Length", SiDimensions::LENGTH, Scale::linear(1609.344))
});

/// Position along an axis, anchored at the origin; differences are in meters
pub static POSITION_METER: LazyLock<UnitRef> =
    LazyLock::new(|| absolute("meter (position)", "m", "Position", Scale::IDENTITY, &METER));
pub static POSITION_KILOMETER: LazyLock<UnitRef> = LazyLock::new(|| {
    absolute("kilometer (position)", "km", "Position", Scale::linear(1000.0), &KILOMETER)
});

// ---------------------------------------------------------------------------
// Area and volume
// ---------------------------------------------------------------------------

pub static SQUARE_METER: LazyLock<UnitRef> =
    LazyLock::new(|| relative("square meter", "m2", "Area", AREA, Scale::IDENTITY));
pub static HECTARE: LazyLock<UnitRef> =
    LazyLock::new(|| relative("hectare", "ha", "Area", AREA, Scale::linear(10_000.0)));
pub static CUBIC_METER: LazyLock<UnitRef> =
    LazyLock::new(|| relative("cubic meter", "m3", "Volume", VOLUME, Scale::IDENTITY));
pub static LITER: LazyLock<UnitRef> =
    LazyLock::new(|| relative("liter", "L", "Volume", VOLUME, Scale::linear(0.001)));

// ---------------------------------------------------------------------------
// Mass
// ---------------------------------------------------------------------------

pub static KILOGRAM: LazyLock<UnitRef> =
    LazyLock::new(|| relative("kilogram", "kg", "Mass", SiDimensions::MASS, Scale::IDENTITY));
pub static GRAM: LazyLock<UnitRef> =
    LazyLock::new(|| relative("gram", "g", "Mass", SiDimensions::MASS, Scale::linear(0.001)));
pub static POUND: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("pound", "lb", "Mass", SiDimensions::MASS, Scale::linear(0.453_592_37))
});

// ---------------------------------------------------------------------------
// Duration and time
// ---------------------------------------------------------------------------

pub static SECOND: LazyLock<UnitRef> =
    LazyLock::new(|| relative("second", "s", "Duration", SiDimensions::TIME, Scale::IDENTITY));
pub static MINUTE: LazyLock<UnitRef> =
    LazyLock::new(|| relative("minute", "min", "Duration", SiDimensions::TIME, Scale::linear(60.0)));
pub static HOUR: LazyLock<UnitRef> =
    LazyLock::new(|| relative("hour", "h", "Duration", SiDimensions::TIME, Scale::linear(3600.0)));
pub static DAY: LazyLock<UnitRef> =
    LazyLock::new(|| relative("day", "day", "Duration", SiDimensions::TIME, Scale::linear(86_400.0)));

/// Point in time, seconds since the epoch
pub static TIME_SECOND: LazyLock<UnitRef> =
    LazyLock::new(|| absolute("second (time)", "s", "Time", Scale::IDENTITY, &SECOND));
pub static TIME_HOUR: LazyLock<UnitRef> =
    LazyLock::new(|| absolute("hour (time)", "h", "Time", Scale::linear(3600.0), &HOUR));

pub static HERTZ: LazyLock<UnitRef> =
    LazyLock::new(|| relative("hertz", "Hz", "Frequency", FREQUENCY, Scale::IDENTITY));

// ---------------------------------------------------------------------------
// Mechanics
// ---------------------------------------------------------------------------

pub static METER_PER_SECOND: LazyLock<UnitRef> =
    LazyLock::new(|| relative("meter per second", "m/s", "Speed", SPEED, Scale::IDENTITY));
pub static KILOMETER_PER_HOUR: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("kilometer per hour", "km/h", "Speed", SPEED, Scale::linear(1000.0 / 3600.0))
});
pub static METER_PER_SECOND_2: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("meter per second squared", "m/s2", "Acceleration", ACCELERATION, Scale::IDENTITY)
});
pub static NEWTON: LazyLock<UnitRef> =
    LazyLock::new(|| relative("newton", "N", "Force", FORCE, Scale::IDENTITY));
pub static KILOGRAM_FORCE: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("kilogram-force", "kgf", "Force", FORCE, Scale::linear(STANDARD_GRAVITY))
});
pub static JOULE: LazyLock<UnitRef> =
    LazyLock::new(|| relative("joule", "J", "Energy", ENERGY, Scale::IDENTITY));
pub static KILOWATT_HOUR: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("kilowatt-hour", "kWh", "Energy", ENERGY, Scale::linear(3.6e6))
});
pub static WATT: LazyLock<UnitRef> =
    LazyLock::new(|| relative("watt", "W", "Power", POWER, Scale::IDENTITY));
pub static KILOWATT: LazyLock<UnitRef> =
    LazyLock::new(|| relative("kilowatt", "kW", "Power", POWER, Scale::linear(1000.0)));

// ---------------------------------------------------------------------------
// Temperature
// ---------------------------------------------------------------------------

pub static KELVIN: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("kelvin", "K", "Temperature", SiDimensions::TEMPERATURE, Scale::IDENTITY)
});
pub static DEGREE_CELSIUS: LazyLock<UnitRef> = LazyLock::new(|| {
    relative("degree Celsius", "°C", "Temperature", SiDimensions::TEMPERATURE, Scale::IDENTITY)
});
pub static DEGREE_FAHRENHEIT: LazyLock<UnitRef> = LazyLock::new(|| {
    relative(
        "degree Fahrenheit",
        "°F",
        "Temperature",
        SiDimensions::TEMPERATURE,
        Scale::linear(5.0 / 9.0),
    )
});

pub static ABSOLUTE_KELVIN: LazyLock<UnitRef> = LazyLock::new(|| {
    absolute("kelvin (absolute)", "K", "AbsoluteTemperature", Scale::IDENTITY, &KELVIN)
});
pub static ABSOLUTE_CELSIUS: LazyLock<UnitRef> = LazyLock::new(|| {
    absolute(
        "degree Celsius (absolute)",
        "°C",
        "AbsoluteTemperature",
        Scale::offset_linear(1.0, 273.15),
        &DEGREE_CELSIUS,
    )
});
pub static ABSOLUTE_FAHRENHEIT: LazyLock<UnitRef> = LazyLock::new(|| {
    absolute(
        "degree Fahrenheit (absolute)",
        "°F",
        "AbsoluteTemperature",
        Scale::offset_linear(5.0 / 9.0, 459.67),
        &DEGREE_FAHRENHEIT,
    )
});

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

pub static MONEY: LazyLock<UnitRef> =
    LazyLock::new(|| relative("money", "$", "Money", SiDimensions::MONEY, Scale::IDENTITY));

/// Every relative identity-scale unit, in registration priority order
pub(crate) fn standard_units() -> Vec<UnitRef> {
    [
        &SI,
        &METER,
        &KILOGRAM,
        &SECOND,
        &KELVIN,
        &SQUARE_METER,
        &CUBIC_METER,
        &HERTZ,
        &METER_PER_SECOND,
        &METER_PER_SECOND_2,
        &NEWTON,
        &JOULE,
        &WATT,
        &MONEY,
    ]
    .into_iter()
    .map(|unit| UnitRef::clone(unit))
    .collect()
}
