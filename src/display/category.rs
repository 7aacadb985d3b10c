//! Category display formatting

use crate::models::Category;

use super::report::separator;

/// Format the category list with the positions used for deletion
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories defined.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:>5}  {:<50} {:>15}\n", "#", "Name", "ID"));
    output.push_str(&separator(74));
    output.push('\n');

    for (index, category) in categories.iter().enumerate() {
        output.push_str(&format!(
            "{:>5}  {:<50} {:>15}\n",
            index,
            category.name,
            category.id.to_string()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_categories;

    #[test]
    fn test_category_list() {
        let text = format_category_list(&default_categories());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert!(lines[2].trim_start().starts_with("0  Food"));
        assert!(lines[9].trim_end().ends_with('8'));
    }

    #[test]
    fn test_empty_category_list() {
        assert_eq!(format_category_list(&[]), "No categories defined.\n");
    }
}
