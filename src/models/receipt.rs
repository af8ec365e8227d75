use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Serialize;
use std::fmt;

/// 购物小票 (POST /receipts/process 请求体)
///
/// 金额保留原始文本, 由积分计算时再解析. 解码规则:
/// - 字段名不区分大小写, 重复字段以最后一次出现为准
/// - 缺失字段保持零值, 字符串字段为 `null` 时不覆盖已有值
/// - `items` 为 `null` 时清空, 数组中的 `null` 解码为空商品行
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: String, // YYYY-MM-DD
    pub purchase_time: String, // HH:MM (24小时制)
    pub items: Vec<Item>,
    pub total: String,
}

/// 小票商品行
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,
    pub price: String,
}

impl Receipt {
    /// 从请求体解码小票
    ///
    /// 只解析第一个 JSON 值, 之后的多余字节忽略; 整个请求体为 `null` 时得到空小票.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut stream = serde_json::Deserializer::from_slice(body).into_iter::<Option<Receipt>>();
        match stream.next() {
            Some(value) => Ok(value?.unwrap_or_default()),
            None => Err(<serde_json::Error as de::Error>::custom("empty request body")),
        }
    }
}

const RECEIPT_FIELDS: &[&str] = &["retailer", "purchaseDate", "purchaseTime", "items", "total"];
const ITEM_FIELDS: &[&str] = &["shortDescription", "price"];

/// 按字段名 (忽略大小写) 查找
fn lookup_field(key: &str, fields: &[&'static str]) -> Option<&'static str> {
    fields.iter().copied().find(|field| field.eq_ignore_ascii_case(key))
}

/// `null` 不覆盖已有值
fn assign(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl<'de> Deserialize<'de> for Receipt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ReceiptVisitor;

        impl<'de> Visitor<'de> for ReceiptVisitor {
            type Value = Receipt;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a receipt object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Receipt, A::Error> {
                let mut receipt = Receipt::default();
                while let Some(key) = map.next_key::<String>()? {
                    match lookup_field(&key, RECEIPT_FIELDS) {
                        Some("retailer") => assign(&mut receipt.retailer, map.next_value()?),
                        Some("purchaseDate") => assign(&mut receipt.purchase_date, map.next_value()?),
                        Some("purchaseTime") => assign(&mut receipt.purchase_time, map.next_value()?),
                        Some("total") => assign(&mut receipt.total, map.next_value()?),
                        Some("items") => {
                            receipt.items = map
                                .next_value::<Option<Vec<Option<Item>>>>()?
                                .unwrap_or_default()
                                .into_iter()
                                .map(Option::unwrap_or_default)
                                .collect();
                        }
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(receipt)
            }
        }

        deserializer.deserialize_map(ReceiptVisitor)
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemVisitor;

        impl<'de> Visitor<'de> for ItemVisitor {
            type Value = Item;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an item object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Item, A::Error> {
                let mut item = Item::default();
                while let Some(key) = map.next_key::<String>()? {
                    match lookup_field(&key, ITEM_FIELDS) {
                        Some("shortDescription") => assign(&mut item.short_description, map.next_value()?),
                        Some("price") => assign(&mut item.price, map.next_value()?),
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(item)
            }
        }

        deserializer.deserialize_map(ItemVisitor)
    }
}
