//! Delimited, escape-aware names.
//!
//! A name is an ordered list of masked components. [`StringArrayName`] keeps
//! the components in a list, [`StringName`] keeps one masked string and parses
//! it on demand. Both behave identically through the [`Name`] trait.

pub mod escaping;
mod name;
mod string_array_name;
mod string_name;

pub use escaping::{DEFAULT_DELIMITER, ESCAPE_CHARACTER, mask, unmask};
pub use name::Name;
pub use string_array_name::StringArrayName;
pub use string_name::StringName;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn both(components: &[&str], delimiter: char) -> [Box<dyn Name>; 2] {
        let array = StringArrayName::with_delimiter(components.iter().copied(), delimiter).unwrap();
        let string = StringName::with_delimiter(&array.as_string(), delimiter).unwrap();
        [Box::new(array), Box::new(string)]
    }

    #[rstest]
    #[case(&["oss", "cs", "fau", "de"], '.')]
    #[case(&[r"a\.b", "c"], '.')]
    #[case(&["a.b", r"c\#d"], '#')]
    #[case(&[r"back\\slash"], '/')]
    #[case(&["", "x"], '.')]
    fn data_string_round_trips(#[case] components: &[&str], #[case] delimiter: char) {
        for name in both(components, delimiter) {
            let reparsed = StringName::new(&name.as_data_string()).unwrap();
            assert!(reparsed.is_equal(&*name), "{name:?} vs {reparsed:?}");
            assert_eq!(reparsed.hash_code(), name.hash_code());
        }
    }

    #[test]
    fn equality_ignores_the_configured_delimiter() {
        let dotted = StringArrayName::new(["oss", "cs", "fau"]).unwrap();
        let slashed = StringName::with_delimiter("oss/cs/fau", '/').unwrap();
        assert_eq!(dotted, slashed);
        assert_eq!(slashed, dotted);
        assert_eq!(dotted.hash_code(), slashed.hash_code());

        let shorter = StringName::with_delimiter("oss/cs", '/').unwrap();
        assert_ne!(dotted, shorter);
    }

    #[test]
    fn appended_delimiter_is_masked_in_as_string() {
        for mut name in both(&["oss", "cs"], '.') {
            name.append(&mask("fau.de", '.')).unwrap();
            let rendered = name.as_string();
            assert_eq!(rendered, r"oss.cs.fau\.de");
            assert_eq!(StringName::new(&rendered).unwrap().no_components(), 3);
        }
    }

    #[rstest]
    #[case("#", r"oss#cs\#x#fau")]
    #[case("/", "oss/cs#x/fau")]
    #[case("", "osscs#xfau")]
    fn as_string_with_other_delimiters(#[case] delimiter: &str, #[case] expected: &str) {
        for name in both(&["oss", "cs#x", "fau"], '.') {
            assert_eq!(name.as_string_with(delimiter).unwrap(), expected);
        }
    }

    #[rstest]
    #[case("::")]
    #[case("\\")]
    fn as_string_with_rejects_bad_delimiters(#[case] delimiter: &str) {
        for name in both(&["oss"], '.') {
            assert!(name.as_string_with(delimiter).unwrap_err().is_argument_error());
        }
    }

    #[test]
    fn equality_compares_masked_components() {
        let escaped_delimiter = StringArrayName::new([r"a\.b"]).unwrap();
        let two_components = StringArrayName::new(["a", "b"]).unwrap();
        assert_ne!(escaped_delimiter, two_components);

        let hashed = StringArrayName::with_delimiter([r"a\#b"], '#').unwrap();
        let literal = StringName::with_delimiter("a#b", '.').unwrap();
        assert_eq!(hashed, literal);
        assert_eq!(hashed.hash_code(), literal.hash_code());

        assert!(StringArrayName::new([r"\a"]).unwrap_err().is_argument_error());
        let mut name = StringName::new("a").unwrap();
        assert!(name.set_component(0, r"\a").unwrap_err().is_argument_error());
        assert_eq!(name, StringArrayName::new(["a"]).unwrap());
    }

    #[test]
    fn masked_foreign_delimiter_is_kept_literal() {
        let name = StringArrayName::with_delimiter(["oss.cs.fau.de"], '#').unwrap();
        assert_eq!(name.as_string(), "oss.cs.fau.de");
        assert_eq!(name.as_data_string(), r"oss\.cs\.fau\.de");
    }

    #[test]
    fn concat_appends_in_order() {
        for mut name in both(&["oss", "cs"], '.') {
            let other = StringName::with_delimiter("fau/de.x", '/').unwrap();
            name.concat(&other).unwrap();
            assert_eq!(name.no_components(), 4);
            assert_eq!(name.as_string(), r"oss.cs.fau.de\.x");
        }
    }

    #[test]
    fn concat_with_empty_name_changes_nothing() {
        for mut name in both(&["oss"], '.') {
            name.concat(&StringName::empty('.').unwrap()).unwrap();
            assert_eq!(name.no_components(), 1);
        }
    }

    #[test]
    fn boxed_names_clone_and_compare() {
        let [array, string] = both(&["a", "b"], '.');
        let copy = array.clone();
        assert!(*copy == *string);
        assert_eq!(copy.to_string(), "a.b");
    }

    #[test]
    fn hash_code_matches_rolling_polynomial() {
        let name = StringName::new("ab").unwrap();
        assert_eq!(name.hash_code(), 97 * 31 + 98);
        assert_eq!(StringName::new("").unwrap().hash_code(), 0);
    }
}
