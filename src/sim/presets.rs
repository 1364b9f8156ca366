use three_d::Srgba;

use super::body::CelestialBody;

const YELLOW: Srgba = Srgba { r: 255, g: 255, b: 0, a: 255 };
const GRAY: Srgba = Srgba { r: 128, g: 128, b: 128, a: 255 };
const ORANGE: Srgba = Srgba { r: 255, g: 165, b: 0, a: 255 };
const BLUE: Srgba = Srgba { r: 0, g: 0, b: 255, a: 255 };
const RED: Srgba = Srgba { r: 255, g: 0, b: 0, a: 255 };
const CYAN: Srgba = Srgba { r: 0, g: 255, b: 255, a: 255 };

pub(super) fn sun() -> CelestialBody {
    CelestialBody::new(
        "Sun",
        10.0,
        YELLOW,
        0.0,
        0.0,
        "The Sun is about 4.6 billion years old. It has no rotation period like planets \
        (differential rotation: 25-35 days). Composition: Mostly hydrogen (74%) and helium (24%).",
    )
}

pub(super) fn mercury() -> CelestialBody {
    CelestialBody::new(
        "Mercury",
        0.4,
        GRAY,
        20.0,
        88.0,
        "Mercury is about 4.5 billion years old. Orbital period: 88 days. \
        Rotation period: 59 days. Composition: Iron core, silicate mantle.",
    )
}

pub(super) fn venus() -> CelestialBody {
    CelestialBody::new(
        "Venus",
        0.9,
        ORANGE,
        30.0,
        225.0,
        "Venus is about 4.5 billion years old. Orbital period: 225 days. \
        Rotation period: 243 days (retrograde). Composition: Rocky, with thick CO2 atmosphere.",
    )
}

pub(super) fn earth() -> CelestialBody {
    CelestialBody::new(
        "Earth",
        1.0,
        BLUE,
        40.0,
        365.0,
        "Earth is about 4.5 billion years old. Orbital period: 365 days. \
        Rotation period: 24 hours. Composition: Iron core, silicate mantle, water, \
        nitrogen-oxygen atmosphere.",
    )
}

pub(super) fn mars() -> CelestialBody {
    CelestialBody::new(
        "Mars",
        0.5,
        RED,
        60.0,
        687.0,
        "Mars is about 4.5 billion years old. Orbital period: 687 days. \
        Rotation period: 25 hours. Composition: Iron core, silicate mantle, thin CO2 atmosphere.",
    )
}

pub(super) fn jupiter() -> CelestialBody {
    CelestialBody::new(
        "Jupiter",
        5.0,
        ORANGE,
        100.0,
        4333.0,
        "Jupiter is about 4.6 billion years old. Orbital period: 4333 days (12 years). \
        Rotation period: 10 hours. Composition: Mostly hydrogen and helium gas giant.",
    )
}

pub(super) fn saturn() -> CelestialBody {
    CelestialBody::new(
        "Saturn",
        4.0,
        YELLOW,
        150.0,
        10759.0,
        "Saturn is about 4.5 billion years old. Orbital period: 10759 days (29 years). \
        Rotation period: 11 hours. Composition: Hydrogen, helium, with rings of ice/rock.",
    )
}

pub(super) fn uranus() -> CelestialBody {
    CelestialBody::new(
        "Uranus",
        3.0,
        CYAN,
        200.0,
        30687.0,
        "Uranus is about 4.5 billion years old. Orbital period: 30687 days (84 years). \
        Rotation period: 17 hours (retrograde). Composition: Ice giant with hydrogen, helium, methane.",
    )
}

pub(super) fn neptune() -> CelestialBody {
    CelestialBody::new(
        "Neptune",
        3.0,
        BLUE,
        250.0,
        60190.0,
        "Neptune is about 4.5 billion years old. Orbital period: 60190 days (165 years). \
        Rotation period: 16 hours. Composition: Ice giant with hydrogen, helium, methane.",
    )
}

pub(super) const RELATIONSHIPS: [(&str, &str, &str); 5] = [
    (
        "Earth",
        "Sun",
        "The average distance between Earth and the Sun is about 149.6 million km (1 AU). \
        The Sun provides energy for life on Earth.",
    ),
    (
        "Venus",
        "Earth",
        "Venus and Earth are similar in size and composition (both rocky planets), \
        but Venus has a runaway greenhouse effect making it much hotter.",
    ),
    (
        "Mars",
        "Earth",
        "Mars and Earth share similarities like polar ice caps and seasons, \
        but Mars has a thinner atmosphere and is colder.",
    ),
    (
        "Jupiter",
        "Sun",
        "Jupiter orbits the Sun at an average distance of about 778 million km (5.2 AU). \
        Its massive size helps protect inner planets by deflecting comets and asteroids.",
    ),
    (
        "Saturn",
        "Jupiter",
        "Saturn and Jupiter are both gas giants with massive atmospheres primarily composed \
        of hydrogen and helium, but Saturn has a more prominent ring system and lower density.",
    ),
];
