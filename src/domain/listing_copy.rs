//! Templated listing copy in Traditional Chinese.
//!
//! Every category-specific phrase comes from an exhaustive match over
//! [`Keyword`], so adding a category will not compile until its copy exists.

use super::Keyword;
use super::listing::ListingRecord;

/// Hashtags attached to every listing.
pub const BASE_HASHTAGS: [&str; 4] = ["#日本代購", "#日本直送", "#空運直送", "#日本正品"];

/// Name fragments that mark a product as food regardless of category.
const FOOD_TERMS: [&str; 7] = ["零食", "泡麵", "調味料", "咖啡", "食品", "餅乾", "糖果"];

/// Characters of the product name quoted in the product details block.
const DESCRIPTION_NAME_CHARS: usize = 50;

/// Three selling points per category.
#[must_use]
pub const fn features(keyword: Keyword) -> [&'static str; 3] {
    match keyword {
        Keyword::Snacks => ["日本人氣零食", "獨特風味", "精緻包裝"],
        Keyword::InstantNoodles => ["日本國民美食", "濃郁湯頭", "道地風味"],
        Keyword::Seasonings => ["專業主廚愛用", "提升料理層次", "天然食材"],
        Keyword::Coffee => ["嚴選咖啡豆", "香醇順口", "職人烘焙"],
        Keyword::HouseholdGoods => ["日本製造", "設計精美", "品質保證"],
        Keyword::Beauty => ["日本熱銷", "溫和配方", "適合亞洲肌膚"],
    }
}

/// Category hashtags, without the shared base set.
#[must_use]
pub const fn category_hashtags(keyword: Keyword) -> [&'static str; 3] {
    match keyword {
        Keyword::Snacks => ["#日本零食", "#進口零食", "#日本伴手禮"],
        Keyword::InstantNoodles => ["#日本泡麵", "#日本拉麵", "#日本美食"],
        Keyword::Seasonings => ["#日本調味料", "#料理必備", "#日本廚房"],
        Keyword::Coffee => ["#日本咖啡", "#咖啡控", "#辦公室必備"],
        Keyword::HouseholdGoods => ["#日本生活", "#日本雜貨", "#質感生活"],
        Keyword::Beauty => ["#日本美妝", "#日本保養", "#日本藥妝"],
    }
}

/// Base hashtags followed by the category's own.
#[must_use]
pub fn hashtags(keyword: Keyword) -> Vec<&'static str> {
    BASE_HASHTAGS
        .into_iter()
        .chain(category_hashtags(keyword))
        .collect()
}

/// Whether a product should be advertised with a freshness guarantee.
#[must_use]
pub fn is_food(keyword: Keyword, name: &str) -> bool {
    keyword.is_food() || FOOD_TERMS.iter().any(|term| name.contains(term))
}

/// Full product description for a marketplace listing.
#[must_use]
pub fn describe(record: &ListingRecord) -> String {
    let listing = record.listing();
    let [first, second, third] = features(listing.keyword());
    let name: String = listing.name().chars().take(DESCRIPTION_NAME_CHARS).collect();
    let price = group_thousands(listing.price().get());
    let guarantee = if is_food(listing.keyword(), listing.name()) {
        "✓ 最新效期 — 保證新鮮"
    } else {
        "✓ 正品保證"
    };

    format!(
        "【商品特點】\n\n\
         ・{first}\n\
         ・{second}\n\
         ・{third}\n\
         ・100% 日本原裝進口\n\n\
         【產品規格】\n\n\
         商品名稱：{name}\n\
         售價：NT${price}\n\
         產地：日本\n\n\
         【為什麼選擇我們】\n\n\
         ✓ 日本通路代購 — 正規店舖購入\n\
         ✓ 空運直送 — 新鮮直達\n\
         ✓ 包裝嚴實 — 完整保護\n\
         ✓ 快速出貨 — 3-5天內寄出\n\
         {guarantee}\n\n\
         有問題歡迎詢問！"
    )
}

/// Rounds to a whole unit and inserts `,` every three digits.
#[allow(clippy::cast_possible_truncation)]
fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::test_support::{record, timestamp};
    use crate::domain::{Listing, ListingRecord, ParameterSet, Price, ShopRating};

    #[test]
    fn hashtags_start_with_base_set() {
        let tags = hashtags(Keyword::Coffee);
        assert_eq!(tags.len(), 7);
        let head: Vec<&str> = tags.iter().take(4).copied().collect();
        assert_eq!(head, BASE_HASHTAGS.to_vec());
        assert!(tags.contains(&"#咖啡控"));
    }

    #[test]
    fn food_detection_uses_keyword_and_name() {
        assert!(is_food(Keyword::Snacks, "anything"));
        assert!(is_food(Keyword::HouseholdGoods, "北海道 糖果 禮盒"));
        assert!(!is_food(Keyword::Beauty, "化妝水"));
        for name in ["零食", "泡麵", "調味料", "咖啡"] {
            assert!(is_food(Keyword::Beauty, name), "{name}");
        }
    }

    #[test]
    fn food_term_in_name_gets_freshness_line() {
        let Ok(price) = Price::new(600.0) else {
            panic!("valid price");
        };
        let Ok(rating) = ShopRating::from_reported(4.7) else {
            panic!("valid rating");
        };
        let listing = Listing::new(
            timestamp("2025-01-15 10:30:00"),
            Keyword::Beauty,
            "咖啡 去角質",
            price,
            20,
            rating,
        );
        let text = describe(&ListingRecord::new(listing, &ParameterSet::default()));
        assert!(text.contains("最新效期"));
        assert!(!text.contains("✓ 正品保證"));
    }

    #[test]
    fn description_embeds_features_and_price() {
        let r = record(Keyword::Coffee, 1234.4, 10, 4.5);
        let text = describe(&r);
        assert!(text.contains("・嚴選咖啡豆"));
        assert!(text.contains("售價：NT$1,234"));
        assert!(text.contains("最新效期"));
    }

    #[test]
    fn non_food_gets_authenticity_line() {
        let r = record(Keyword::Beauty, 500.0, 10, 4.5);
        let text = describe(&r);
        assert!(text.contains("✓ 正品保證"));
        assert!(!text.contains("最新效期"));
    }

    #[test]
    fn description_quotes_first_fifty_chars() {
        let Ok(price) = Price::new(100.0) else {
            panic!("valid price");
        };
        let name = "長".repeat(80);
        let listing = Listing::new(
            timestamp("2025-01-15 10:30:00"),
            Keyword::Beauty,
            &name,
            price,
            1,
            ShopRating::Unknown,
        );
        let r = ListingRecord::new(listing, &ParameterSet::default());
        let text = describe(&r);
        assert!(text.contains(&format!("商品名稱：{}\n", "長".repeat(50))));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.4), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(-1500.0), "-1,500");
    }
}
