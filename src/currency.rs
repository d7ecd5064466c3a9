// ₹ Currency formatting - Indian numbering (lakh / crore grouping)
//
// Amounts are whole rupees. The output matches en-IN locale formatting with
// no fraction digits: the last three digits form one group, every group
// above that has two digits.

const RUPEE: char = '₹';
const CRORE: u64 = 10_000_000;

/// Group the decimal digits of `amount` the Indian way: `5000000` -> `50,00,000`
pub fn group_indian(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);

    // Leading group has one or two digits, then pairs
    let lead = head.len() % 2;
    if lead == 1 {
        out.push_str(&head[..1]);
    }
    for (i, pair) in head.as_bytes()[lead..].chunks(2).enumerate() {
        if i > 0 || lead == 1 {
            out.push(',');
        }
        // Digits are ASCII
        out.extend(pair.iter().map(|b| *b as char));
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// `format_inr(5000000)` -> `"₹50,00,000"`
pub fn format_inr(amount: u64) -> String {
    format!("{}{}", RUPEE, group_indian(amount))
}

/// Signed variant for deltas: `-5000` -> `"-₹5,000"`
pub fn format_inr_signed(amount: i64) -> String {
    if amount < 0 {
        format!("-{}", format_inr(amount.unsigned_abs()))
    } else {
        format_inr(amount.unsigned_abs())
    }
}

/// Chart axis label in crores with one decimal: `10000000` -> `"₹1.0Cr"`
pub fn format_crore(amount: u64) -> String {
    // Tenths of a crore, rounded half-up
    let tenths = (amount as u128 * 10 + CRORE as u128 / 2) / CRORE as u128;
    format!("{}{}.{}Cr", RUPEE, tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_are_not_grouped() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(7), "₹7");
        assert_eq!(format_inr(999), "₹999");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(1_000), "₹1,000");
        assert_eq!(format_inr(99_999), "₹99,999");
        assert_eq!(format_inr(100_000), "₹1,00,000");
        assert_eq!(format_inr(5_000_000), "₹50,00,000");
        assert_eq!(format_inr(10_000_000), "₹1,00,00,000");
        assert_eq!(format_inr(85_000_000), "₹8,50,00,000");
        assert_eq!(format_inr(1_234_567_890), "₹1,23,45,67,890");
    }

    #[test]
    fn test_format_is_deterministic() {
        assert_eq!(format_inr(10_000_000), format_inr(10_000_000));
    }

    #[test]
    fn test_signed_amounts() {
        assert_eq!(format_inr_signed(-5_000), "-₹5,000");
        assert_eq!(format_inr_signed(2_500_000), "₹25,00,000");
        assert_eq!(format_inr_signed(i64::MIN), "-₹92,23,37,20,36,85,47,75,808");
    }

    #[test]
    fn test_crore_axis_labels() {
        assert_eq!(format_crore(0), "₹0.0Cr");
        assert_eq!(format_crore(10_000_000), "₹1.0Cr");
        assert_eq!(format_crore(22_000_000), "₹2.2Cr");
        assert_eq!(format_crore(8_500_000), "₹0.9Cr");
        assert_eq!(format_crore(85_000_000), "₹8.5Cr");
    }
}
