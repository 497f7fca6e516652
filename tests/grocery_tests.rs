#[cfg(test)]
mod tests {
    use recipe_pantry::categorizer::{categorize, Category};
    use recipe_pantry::combiner::{build_grocery_list, combine_all, ConsolidatedItem};
    use recipe_pantry::text_processing::parse_ingredient;

    fn parse_all(lines: &[&str]) -> Vec<recipe_pantry::ParsedIngredient> {
        lines.iter().map(|line| parse_ingredient(line)).collect()
    }

    fn find<'a>(list: &'a [ConsolidatedItem], name: &str) -> &'a ConsolidatedItem {
        list.iter()
            .find(|item| item.name == name)
            .unwrap_or_else(|| panic!("missing item '{}' in {:?}", name, list))
    }

    #[test]
    fn test_same_ingredient_across_spellings_merges() {
        let list = combine_all(&parse_all(&["1 cup milk", "2 cups milk"]));

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "milk");
        assert_eq!(list[0].category, Category::Dairy);
        assert_eq!(list[0].display_quantity.as_deref(), Some("3.0"));
        assert_eq!(list[0].unit.as_deref(), Some("cup"));
    }

    #[test]
    fn test_produce_before_pantry() {
        let list = combine_all(&parse_all(&["1 bread", "2 bananas"]));
        let names: Vec<&str> = list.iter().map(|item| item.name.as_str()).collect();

        assert_eq!(names, vec!["bananas", "bread"]);
        assert_eq!(list[0].category, Category::Produce);
        assert_eq!(list[1].category, Category::Pantry);
    }

    #[test]
    fn test_empty_input() {
        assert!(combine_all(&[]).is_empty());
        assert!(build_grocery_list(&[]).is_empty());
    }

    #[test]
    fn test_empty_names_skipped() {
        let list = combine_all(&parse_all(&["", "2 cups", "1 tsp salt"]));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "salt");
    }

    #[test]
    fn test_categorize_is_stable() {
        for name in ["milk", "chicken breast", "bananas", "mystery spice", ""] {
            let first = categorize(name);
            for _ in 0..5 {
                assert_eq!(categorize(name), first);
            }
        }
    }

    #[test]
    fn test_list_from_several_recipes() {
        let pancakes = "2 cups milk\n1 tsp salt\n2 eggs";
        let dinner = "1 cup milk\n1 tsp salt\n3 eggs\n1 lb chicken breast";

        let list = build_grocery_list(&[pancakes, dinner]);
        let names: Vec<&str> = list.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["milk", "chicken breast", "salt", "eggs"]);

        let milk = find(&list, "milk");
        assert_eq!(milk.to_string(), "3.0 cup milk");

        let salt = find(&list, "salt");
        assert_eq!(salt.unit.as_deref(), Some("tsp"));
        assert_eq!(salt.display_quantity.as_deref(), Some("2.0"));

        let eggs = find(&list, "eggs");
        assert_eq!(eggs.category, Category::Other);
        assert_eq!(eggs.unit, None);
        assert_eq!(eggs.display_quantity.as_deref(), Some("2.0 + 3.0"));

        let chicken = find(&list, "chicken breast");
        assert_eq!(chicken.category, Category::Meat);
        assert_eq!(chicken.to_string(), "1.0 lb chicken breast");
    }

    #[test]
    fn test_shared_word_groups_under_first_name() {
        let list = combine_all(&parse_all(&["1 tbsp olive oil", "2 tbsp oil"]));

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "olive oil");
        assert_eq!(list[0].display_quantity.as_deref(), Some("3.0"));
        assert_eq!(list[0].unit.as_deref(), Some("tbsp"));
    }

    #[test]
    fn test_different_units_kept_apart() {
        let list = combine_all(&parse_all(&["1 cup sugar", "100 g sugar"]));
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|item| item.name == "sugar"));
    }

    #[test]
    fn test_totals_promote_display_unit() {
        let list = combine_all(&parse_all(&["600 g potatoes", "500 grams potatoes"]));

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].unit.as_deref(), Some("kg"));
        assert_eq!(list[0].display_quantity.as_deref(), Some("1.1"));
    }

    #[test]
    fn test_json_shape() {
        let list = combine_all(&parse_all(&["1 cup milk"]));
        let value = serde_json::to_value(&list[0]).unwrap();

        assert_eq!(value["name"], "milk");
        assert_eq!(value["category"], "dairy");
        assert_eq!(value["unit"], "cup");
        assert_eq!(value["displayQuantity"], "1.0");
    }
}
