// ═══════════════════════════════════════════════════════════════════
// Format Tests — Persian digits, Toman amounts, quantities, percents
// ═══════════════════════════════════════════════════════════════════

use toman_tracker_core::format::{
    format_currency_input, format_percent, format_quantity, format_quantity_with, format_toman,
    parse_currency_input, to_persian_digits,
};

// ═══════════════════════════════════════════════════════════════════
// Digit mapping
// ═══════════════════════════════════════════════════════════════════

mod persian_digits {
    use super::*;

    #[test]
    fn maps_all_ten_digits() {
        assert_eq!(to_persian_digits("0123456789"), "۰۱۲۳۴۵۶۷۸۹");
    }

    #[test]
    fn leaves_non_digits_untouched() {
        assert_eq!(to_persian_digits("abc 12 xyz"), "abc ۱۲ xyz");
        assert_eq!(to_persian_digits("-4.5%"), "-۴.۵%");
    }

    #[test]
    fn empty_string() {
        assert_eq!(to_persian_digits(""), "");
    }

    #[test]
    fn persian_input_passes_through() {
        assert_eq!(to_persian_digits("۱۲۳"), "۱۲۳");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Toman amounts
// ═══════════════════════════════════════════════════════════════════

mod toman {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_toman(1_234_567.0), "۱٬۲۳۴٬۵۶۷");
        assert_eq!(format_toman(1_000.0), "۱٬۰۰۰");
        assert_eq!(format_toman(999.0), "۹۹۹");
    }

    #[test]
    fn zero() {
        assert_eq!(format_toman(0.0), "۰");
    }

    #[test]
    fn rounds_to_whole_toman() {
        assert_eq!(format_toman(42.4), "۴۲");
        assert_eq!(format_toman(42.6), "۴۳");
    }

    #[test]
    fn rounds_halves_up() {
        assert_eq!(format_toman(2.5), "۳");
        // Toward positive infinity for negatives as well
        assert_eq!(format_toman(-2.5), "-۲");
        assert_eq!(format_toman(-3.5), "-۳");
    }

    #[test]
    fn negative_amounts_carry_a_minus() {
        assert_eq!(format_toman(-1_500.0), "-۱٬۵۰۰");
    }

    #[test]
    fn large_amount() {
        assert_eq!(format_toman(361_700_000.0), "۳۶۱٬۷۰۰٬۰۰۰");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Quantities
// ═══════════════════════════════════════════════════════════════════

mod quantity {
    use super::*;

    #[test]
    fn whole_number_has_no_decimals() {
        assert_eq!(format_quantity(100.0), "۱۰۰");
        assert_eq!(format_quantity(1.0), "۱");
    }

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(format_quantity(1_234.5), "۱٬۲۳۴٫۵");
        assert_eq!(format_quantity(2.25), "۲٫۲۵");
    }

    #[test]
    fn small_fractions_get_four_decimals() {
        assert_eq!(format_quantity(0.1234), "۰٫۱۲۳۴");
        assert_eq!(format_quantity(0.5), "۰٫۵");
        assert_eq!(format_quantity(0.0001), "۰٫۰۰۰۱");
    }

    #[test]
    fn values_above_one_keep_two_decimals() {
        // The widening to 4 decimals applies only below 1
        assert_eq!(format_quantity(1.2345), "۱٫۲۳");
    }

    #[test]
    fn groups_large_quantities() {
        assert_eq!(format_quantity(1_500_000.0), "۱٬۵۰۰٬۰۰۰");
    }

    #[test]
    fn negative_quantity() {
        assert_eq!(format_quantity(-2.5), "-۲٫۵");
    }

    #[test]
    fn zero() {
        assert_eq!(format_quantity(0.0), "۰");
    }

    #[test]
    fn custom_decimal_cap() {
        // Gold grams display with four decimals
        assert_eq!(format_quantity_with(2.4567, 4), "۲٫۴۵۶۷");
        assert_eq!(format_quantity_with(2.0, 4), "۲");
    }

    #[test]
    fn custom_cap_still_widens_small_fractions() {
        assert_eq!(format_quantity_with(0.1234, 2), "۰٫۱۲۳۴");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Percentages
// ═══════════════════════════════════════════════════════════════════

mod percent {
    use super::*;

    #[test]
    fn gains_carry_an_explicit_plus() {
        assert_eq!(format_percent(12.5), "+۱۲٫۵۰٪");
        assert_eq!(format_percent(0.01), "+۰٫۰۱٪");
    }

    #[test]
    fn zero_has_no_sign() {
        assert_eq!(format_percent(0.0), "۰٫۰۰٪");
    }

    #[test]
    fn losses_carry_a_minus() {
        assert_eq!(format_percent(-6.0), "-۶٫۰۰٪");
        assert_eq!(format_percent(-12.5), "-۱۲٫۵۰٪");
    }

    #[test]
    fn always_two_decimals() {
        assert_eq!(format_percent(100.0), "+۱۰۰٫۰۰٪");
        assert_eq!(format_percent(33.333), "+۳۳٫۳۳٪");
    }

    #[test]
    fn very_large_percent_groups_thousands() {
        assert_eq!(format_percent(1_234.5), "+۱٬۲۳۴٫۵۰٪");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Amount input fields
// ═══════════════════════════════════════════════════════════════════

mod currency_input {
    use super::*;

    #[test]
    fn groups_raw_digits() {
        assert_eq!(format_currency_input("1234567"), "1,234,567");
    }

    #[test]
    fn regroups_already_grouped_input() {
        assert_eq!(format_currency_input("1,234,567"), "1,234,567");
        assert_eq!(format_currency_input("12,34,567"), "1,234,567");
    }

    #[test]
    fn keeps_decimal_part() {
        assert_eq!(format_currency_input("12345.67"), "12,345.67");
    }

    #[test]
    fn negative_amounts() {
        assert_eq!(format_currency_input("-9876"), "-9,876");
    }

    #[test]
    fn non_numeric_input_is_cleared() {
        assert_eq!(format_currency_input("abc"), "");
        assert_eq!(format_currency_input("12a3"), "");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(format_currency_input(""), "");
    }

    #[test]
    fn parse_strips_commas() {
        assert_eq!(parse_currency_input("1,234.5"), 1_234.5);
        assert_eq!(parse_currency_input("70,000"), 70_000.0);
    }

    #[test]
    fn parse_defaults_to_zero() {
        assert_eq!(parse_currency_input(""), 0.0);
        assert_eq!(parse_currency_input("garbage"), 0.0);
    }

    #[test]
    fn parse_negative() {
        assert_eq!(parse_currency_input("-42"), -42.0);
    }
}
