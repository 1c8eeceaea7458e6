//! Built-in recipe catalog inserted on first launch.

use crate::model::drink::NewDrink;

/// Returns the default recipes in display order.
pub fn default_catalog() -> Vec<NewDrink> {
    vec![
        NewDrink::new(
            "Margarita",
            "50ml Tequila, 20ml Triple Sec, 20ml Lime juice",
            "Shake all ingredients with ice, strain into a chilled cocktail glass, optionally with a salted rim.",
            "margarita",
            40,
        ),
        NewDrink::new(
            "Mojito",
            "40ml Rum, 6 leaves Mint, 20ml Lime juice, Soda water",
            "Muddle mint and lime in a glass, add rum and crushed ice, top up with soda water and stir gently.",
            "mojito",
            20,
        ),
        NewDrink::new(
            "Cosmopolitan",
            "40ml Vodka, 15ml Triple Sec, 30ml Cranberry juice, 10ml Lime juice",
            "Shake all ingredients with ice and strain into a chilled cocktail glass, garnish with lemon zest.",
            "cosmopolitan",
            40,
        ),
        NewDrink::new(
            "Sex on the Beach",
            "40ml Vodka, 20ml Peach liqueur, 40ml Cranberry juice, 40ml Orange juice",
            "Shake vodka and liqueur with ice, strain into a glass with ice, top up with the juices and stir gently.",
            "sex_on_the_beach",
            30,
        ),
        NewDrink::new(
            "Pina Colada",
            "50ml White rum, 30ml Coconut liqueur, 50ml Pineapple juice, 20ml Coconut cream",
            "Shake all ingredients with ice and strain into a hurricane glass filled with ice.",
            "pina_colada",
            35,
        ),
        NewDrink::new(
            "Tequila Sunrise",
            "50ml Tequila, 100ml Orange juice, 10ml Grenadine",
            "Pour tequila and juice into a glass with ice, then gently add grenadine and let it sink to the bottom.",
            "tequila_sunrise",
            10,
        ),
        NewDrink::new(
            "Long Island Iced Tea",
            "20ml Vodka, 20ml Tequila, 20ml White rum, 20ml Gin, 20ml Triple Sec, 20ml Lemon juice, Cola",
            "Shake all spirits and the juice with ice, strain into a glass with ice, top up with cola and stir gently.",
            "long_island_iced_tea",
            30,
        ),
        NewDrink::new(
            "Gin and Tonic",
            "50ml Gin, 150ml Tonic, 1 slice Lemon",
            "Pour gin into a glass with ice, top up with tonic, stir gently and garnish with a lemon slice.",
            "gin_and_tonic",
            5,
        ),
        NewDrink::new(
            "Cuba Libre",
            "50ml Rum, 120ml Cola, 10ml Lime juice",
            "Pour rum into a glass with ice, add lime juice, top up with cola and stir gently.",
            "cuba_libre",
            5,
        ),
        NewDrink::new(
            "Whiskey Sour",
            "50ml Whiskey, 20ml Lemon juice, 20ml Sugar syrup",
            "Shake all ingredients with ice and strain into a glass with ice, optionally garnish with a cherry.",
            "whiskey_sour",
            30,
        ),
        NewDrink::new(
            "Blue Lagoon",
            "50ml Vodka, 20ml Blue Curacao, 100ml Sprite",
            "Shake vodka and Blue Curacao with ice, strain into a glass with ice, top up with Sprite and stir gently.",
            "blue_lagoon",
            20,
        ),
        NewDrink::new(
            "Aperol Spritz",
            "60ml Aperol, 90ml Prosecco, 30ml Soda water",
            "Pour Aperol and Prosecco into a wine glass with ice, top up with soda water and stir gently.",
            "aperol_spritz",
            10,
        ),
        NewDrink::new(
            "Old Fashioned",
            "50ml Bourbon, 1 cube Sugar, 2 Dashes Angostura Bitters, Splash of water",
            "Dissolve the sugar with bitters and water in a glass, add ice and bourbon, stir gently.",
            "old_fashioned",
            20,
        ),
        NewDrink::new(
            "Negroni",
            "30ml Gin, 30ml Campari, 30ml Sweet vermouth",
            "Pour all ingredients into a glass with ice and stir gently, garnish with orange peel.",
            "negroni",
            15,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::default_catalog;
    use std::collections::HashSet;

    #[test]
    fn default_catalog_is_valid_and_unique() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 14);

        let names: HashSet<_> = catalog.iter().map(|drink| drink.name.as_str()).collect();
        assert_eq!(names.len(), catalog.len());

        for drink in &catalog {
            drink.validate().unwrap();
            assert!(!drink.is_favourite);
        }
    }
}
