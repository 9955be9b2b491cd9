//! Built-in sample catalog for demos and offline use.

use super::source::{ListingSource, SourceError};
use crate::domain::{Keyword, RawListing};

/// `(keyword, name, price TWD, sales, shop rating)`
type SampleRow = (Keyword, &'static str, f64, u64, f64);

const SAMPLE_PRODUCTS: &[SampleRow] = &[
    (Keyword::Snacks, "Calbee 卡樂比 薯條三兄弟 北海道限定 10袋入", 399.0, 1520, 4.9),
    (Keyword::Snacks, "Royce 生巧克力 抹茶口味 20入", 650.0, 830, 4.8),
    (Keyword::Snacks, "Glico 固力果 Pocky 百奇 草莓棒 家庭號", 129.0, 2310, 4.7),
    (Keyword::Snacks, "白色戀人 白巧克力餅乾 12枚入", 520.0, 95, 4.9),
    (Keyword::Snacks, "明治 Meiji 杏仁巧克力 大包裝", 189.0, 420, 0.0),
    (Keyword::InstantNoodles, "日清 合味道 杯麵 海鮮口味 20入 整箱", 880.0, 640, 4.8),
    (Keyword::InstantNoodles, "一蘭拉麵 博多細麵 5食入", 560.0, 1180, 4.9),
    (Keyword::InstantNoodles, "札幌一番 鹽味拉麵 5包入", 159.0, 760, 4.6),
    (Keyword::InstantNoodles, "日清 UFO 炒麵 醬汁濃厚 12入", 690.0, 88, 4.4),
    (Keyword::Seasonings, "龜甲萬 減鹽醬油 1L", 219.0, 540, 4.8),
    (Keyword::Seasonings, "味之素 烤肉醬 燒肉のたれ 中辛", 149.0, 310, 4.5),
    (Keyword::Seasonings, "S&B 黃金咖哩塊 辣味 大包裝", 329.0, 120, 4.7),
    (Keyword::Seasonings, "丘比 QP 美乃滋 450g 3入", 259.0, 45, 4.3),
    (Keyword::Coffee, "UCC 職人咖啡 濾掛式 深焙 50入", 599.0, 980, 4.9),
    (Keyword::Coffee, "AGF Blendy 即溶咖啡 棒狀 100本", 720.0, 430, 4.8),
    (Keyword::Coffee, "KEY COFFEE 特級濾掛 綜合 30入", 380.0, 150, 4.6),
    (Keyword::Coffee, "Starbucks VIA 日本限定 抹茶拿鐵", 460.0, 60, 4.2),
    (Keyword::HouseholdGoods, "獅王 LION 超濃縮洗衣精 補充包 3入", 499.0, 720, 4.7),
    (Keyword::HouseholdGoods, "MUJI 無印良品 超音波香氛機", 1590.0, 210, 4.8),
    (Keyword::HouseholdGoods, "花王 Kao 蒸氣眼罩 無香 14枚", 389.0, 1650, 4.9),
    (Keyword::HouseholdGoods, "象印 保溫杯 480ml 不鏽鋼", 890.0, 35, 0.0),
    (Keyword::Beauty, "肌研 極潤 玻尿酸化妝水 170ml", 299.0, 2040, 4.9),
    (Keyword::Beauty, "資生堂 安耐曬 金鑽高效防曬露 60ml", 790.0, 1320, 4.8),
    (Keyword::Beauty, "DHC 深層卸妝油 200ml", 620.0, 560, 4.7),
    (Keyword::Beauty, "KOSE 雪肌精 化妝水 500ml 限定版", 1380.0, 75, 4.6),
];

/// Fixture-backed source; always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleCatalog;

impl ListingSource for SampleCatalog {
    fn name(&self) -> &'static str {
        "sample"
    }

    fn fetch(&self, keyword: Keyword, limit: usize) -> Result<Vec<RawListing>, SourceError> {
        Ok(SAMPLE_PRODUCTS
            .iter()
            .filter(|(k, ..)| *k == keyword)
            .take(limit)
            .map(|&(k, name, price, sales, rating)| RawListing {
                timestamp: None,
                keyword: Some(k.search_term().to_string()),
                name: Some(name.to_string()),
                price: Some(price.to_string()),
                sales: Some(sales.to_string()),
                shop_rating: Some(rating.to_string()),
            })
            .collect())
    }
}
