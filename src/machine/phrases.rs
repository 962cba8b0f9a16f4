//! What the machine says at each step

use crate::models::{AffectionBand, DrinkId, SizeId, Temperature};

pub const WAITING_NAME: &str = "Please enter your name, my love.";
pub const BREWING: &str = "Brewing your perfect coffee...";
pub const REWARD_READY: &str = "My dearest, a kiss is all I ask for payment...";
pub const REWARD_RECEIVED: &str = "Thank you for your payment... I'm blushing! ❤";

pub fn greeting(name: &str) -> String {
    format!("Hello, {}! What can I brew for you today?", name)
}

pub fn drink_selected(drink: DrinkId) -> String {
    format!("You chose {}. Now, what size?", drink)
}

pub fn size_selected(size: SizeId) -> String {
    format!("Perfect. {}. And hot or cold?", size)
}

pub fn temperature_selected(temperature: Temperature) -> String {
    format!("Understood. {}. Ready to brew your perfect coffee?", temperature)
}

pub fn served(name: &str) -> String {
    format!("Here you are, {}! Enjoy your delicious coffee.", name)
}

pub fn affection(band: AffectionBand) -> &'static str {
    match band {
        AffectionBand::Warming => "You're warming my circuits… I'm melting!",
        AffectionBand::Falling => "I think I'm falling for you… permanently.",
        AffectionBand::Devoted => "You're not just my favorite… you're my only.",
    }
}
