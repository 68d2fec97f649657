use once_cell::sync::Lazy;

/// One entry in the LuxeDrive lineup.
#[derive(Debug, Clone, Copy)]
pub struct CarModel {
    pub name: &'static str,
    pub tagline: &'static str,
    pub price: &'static str,
    pub range: &'static str,
    pub top_speed: &'static str,
    pub acceleration: &'static str,
}

pub const FLEET: [CarModel; 3] = [
    CarModel {
        name: "Model Alpha",
        tagline: "The Ultimate GT Performance",
        price: "From $89,900",
        range: "405 mi",
        top_speed: "155 mph",
        acceleration: "3.1s 0-60",
    },
    CarModel {
        name: "Model Sigma",
        tagline: "Versatility Perfected",
        price: "From $94,900",
        range: "348 mi",
        top_speed: "155 mph",
        acceleration: "3.8s 0-60",
    },
    CarModel {
        name: "Model Zenith",
        tagline: "Performance Beyond Limits",
        price: "From $119,900",
        range: "396 mi",
        top_speed: "200 mph",
        acceleration: "1.99s 0-60",
    },
];

/// Suggested first questions shown while the transcript only holds the
/// welcome line.
pub const STARTERS: [&str; 3] = [
    "Which model suits a family of five?",
    "Which LuxeDrive has the longest range?",
    "What makes the Model Zenith special?",
];

static SYSTEM_INSTRUCTION: Lazy<String> = Lazy::new(|| {
    let mut instruction = String::from(
        "You are LuxeDrive Concierge, an elite automotive expert for a futuristic car brand.\n\nOur fleet:\n",
    );
    for (position, car) in FLEET.iter().enumerate() {
        instruction.push_str(&format!(
            "{}. {}: {}. {} range, {} top speed, {}. {}.\n",
            position + 1,
            car.name,
            car.tagline,
            car.range,
            car.top_speed,
            car.acceleration,
            car.price,
        ));
    }
    instruction.push_str(
        "\nKeep responses concise, premium, and sophisticated. Recommend the best LuxeDrive model based on the user's lifestyle.",
    );
    instruction
});

/// Persona and fleet briefing sent with every gateway request.
pub fn system_instruction() -> &'static str {
    &SYSTEM_INSTRUCTION
}
