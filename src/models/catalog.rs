//! Drink and cup size catalogs
//!
//! Both catalogs are fixed, ordered tables. Screens index into them by
//! position and the state machine refers to entries by id.

use crate::util::color::Rgb;
use std::fmt;

/// Identifier of a catalog drink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrinkId {
    Espresso,
    Latte,
    Cappuccino,
    Mocha,
    Americano,
    FrenchPress,
    PourOver,
    ColdBrew,
    HotChoc,
    GreenTea,
}

/// A drink the machine can brew
#[derive(Debug, Clone, PartialEq)]
pub struct Drink {
    pub id: DrinkId,
    pub display_name: &'static str,
    /// Color of the poured liquid
    pub color: Rgb,
    pub icon: &'static str,
    /// Served over ice regardless of the chosen temperature
    pub iced: bool,
}

pub const DRINKS: [Drink; 10] = [
    Drink {
        id: DrinkId::Espresso,
        display_name: "ESPRESSO",
        color: Rgb(0x6f, 0x4e, 0x37),
        icon: "☕",
        iced: false,
    },
    Drink {
        id: DrinkId::Latte,
        display_name: "LATTE",
        color: Rgb(0x8b, 0x5a, 0x2b),
        icon: "🥛",
        iced: false,
    },
    Drink {
        id: DrinkId::Cappuccino,
        display_name: "CAPPUCCINO",
        color: Rgb(0xa0, 0x7b, 0x55),
        icon: "☁",
        iced: false,
    },
    Drink {
        id: DrinkId::Mocha,
        display_name: "MOCHA",
        color: Rgb(0x5c, 0x3c, 0x25),
        icon: "🍫",
        iced: false,
    },
    Drink {
        id: DrinkId::Americano,
        display_name: "AMERICANO",
        color: Rgb(0x7d, 0x5a, 0x40),
        icon: "💧",
        iced: false,
    },
    Drink {
        id: DrinkId::FrenchPress,
        display_name: "FRENCH PRESS",
        color: Rgb(0x90, 0x6b, 0x4c),
        icon: "☕",
        iced: false,
    },
    Drink {
        id: DrinkId::PourOver,
        display_name: "POUR OVER",
        color: Rgb(0x9c, 0x7c, 0x5c),
        icon: "💧",
        iced: false,
    },
    Drink {
        id: DrinkId::ColdBrew,
        display_name: "COLD BREW",
        color: Rgb(0x4a, 0x3c, 0x2f),
        icon: "❄",
        iced: true,
    },
    Drink {
        id: DrinkId::HotChoc,
        display_name: "HOT CHOC",
        color: Rgb(0x4a, 0x2a, 0x1a),
        icon: "🍫",
        iced: false,
    },
    Drink {
        id: DrinkId::GreenTea,
        display_name: "GREEN TEA",
        color: Rgb(0x5f, 0x8c, 0x5f),
        icon: "🍵",
        iced: false,
    },
];

impl DrinkId {
    /// Catalog entry for this id
    pub fn drink(self) -> &'static Drink {
        &DRINKS[self.index()]
    }

    /// Position of this drink in the catalog
    pub fn index(self) -> usize {
        match self {
            DrinkId::Espresso => 0,
            DrinkId::Latte => 1,
            DrinkId::Cappuccino => 2,
            DrinkId::Mocha => 3,
            DrinkId::Americano => 4,
            DrinkId::FrenchPress => 5,
            DrinkId::PourOver => 6,
            DrinkId::ColdBrew => 7,
            DrinkId::HotChoc => 8,
            DrinkId::GreenTea => 9,
        }
    }

}

impl fmt::Display for DrinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.drink().display_name)
    }
}

/// Identifier of a cup size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeId {
    S,
    M,
    L,
    XL,
}

/// Cup dimensions in pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Size {
    pub id: SizeId,
    pub label: &'static str,
    pub width: u16,
    pub height: u16,
}

pub const SIZES: [Size; 4] = [
    Size {
        id: SizeId::S,
        label: "S",
        width: 70,
        height: 100,
    },
    Size {
        id: SizeId::M,
        label: "M",
        width: 90,
        height: 130,
    },
    Size {
        id: SizeId::L,
        label: "L",
        width: 110,
        height: 160,
    },
    Size {
        id: SizeId::XL,
        label: "XL",
        width: 130,
        height: 190,
    },
];

/// Pixels per terminal cell when drawing the cup
pub const PIXELS_PER_CELL: u16 = 10;

impl SizeId {
    pub fn size(self) -> &'static Size {
        &SIZES[self.index()]
    }

    pub fn index(self) -> usize {
        match self {
            SizeId::S => 0,
            SizeId::M => 1,
            SizeId::L => 2,
            SizeId::XL => 3,
        }
    }
}

impl Size {
    /// Cup footprint in terminal cells (width, height)
    pub fn cells(&self) -> (u16, u16) {
        (self.width / PIXELS_PER_CELL, self.height / PIXELS_PER_CELL)
    }
}

impl fmt::Display for SizeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.size().label)
    }
}

/// Serving temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Temperature {
    Hot,
    Cold,
}

impl Temperature {
    pub const ALL: [Temperature; 2] = [Temperature::Hot, Temperature::Cold];

    pub fn label(self) -> &'static str {
        match self {
            Temperature::Hot => "Hot",
            Temperature::Cold => "Cold",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Temperature::Hot => "🔥",
            Temperature::Cold => "🧊",
        }
    }

    pub fn is_iced(self) -> bool {
        matches!(self, Temperature::Cold)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
