//! Fixed prompts sent to the generative models.
//!
//! Neither prompt is user-customizable: the classifier instruction is
//! identical for every request, and the suggestion prompt only varies by
//! category.

use crate::outfit::OutfitCategory;

/// Instruction sent alongside every outfit photo.
pub const CLASSIFIER_INSTRUCTION: &str = "\
Analyze the outfit worn in this photo and classify it into exactly one of these categories:

- Sport: athletic or workout clothing such as activewear, sneakers, track suits, gym wear or performance fabrics.
- Casual: relaxed everyday clothing such as jeans, t-shirts, casual sneakers or simple dresses.
- Professional: business or formal attire such as suits, blazers, dress shirts, slacks, pencil skirts or dress shoes.
- Chill: comfortable loungewear such as hoodies, sweatpants, pajamas, oversized sweaters or slippers.

Respond with exactly three fields:
- category: one of Sport, Casual, Professional, Chill
- explanation: 2-3 sentences describing the visible clothing items that led to this classification
- confidence: High, Medium or Low";

/// Descriptive phrase for the outfit pieces typical of a category.
pub fn style_phrase(category: OutfitCategory) -> &'static str {
    match category {
        OutfitCategory::Sport => {
            "athletic wear such as performance leggings or joggers, a moisture-wicking top and running sneakers"
        }
        OutfitCategory::Casual => {
            "relaxed everyday pieces such as well-fitted jeans, a plain t-shirt or light sweater and clean white sneakers"
        }
        OutfitCategory::Professional => {
            "polished business attire such as a tailored blazer, a crisp button-down shirt, tailored trousers and leather shoes"
        }
        OutfitCategory::Chill => {
            "cozy loungewear such as a soft oversized hoodie, relaxed sweatpants and comfortable slides"
        }
    }
}

/// Prompt asking the image model for one full-outfit illustration.
pub fn suggestion_prompt(category: OutfitCategory) -> String {
    format!(
        "Generate a single photorealistic, fashion-catalog style image of a complete {name} outfit \
         laid out or worn on a neutral mannequin against a plain light background. \
         The outfit should feature {phrase}. Show the full outfit from head to toe, \
         evenly lit, with no text, logos or people's faces.",
        name = category.as_str().to_lowercase(),
        phrase = style_phrase(category),
    )
}
