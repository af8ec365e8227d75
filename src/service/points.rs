use crate::models::{Item, Receipt};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// 各规则的积分明细
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsBreakdown {
    pub retailer_name: i64,   // 规则1: 商户名字母数字个数
    pub round_total: i64,     // 规则2: 整数金额
    pub quarter_total: i64,   // 规则3: 0.25 的倍数
    pub item_pairs: i64,      // 规则4: 每两件商品
    pub descriptions: i64,    // 规则5: 描述长度为3的倍数
    pub large_total: i64,     // 规则6: 总额大于 10.00
    pub odd_day: i64,         // 规则7: 购买日为奇数
    pub afternoon: i64,       // 规则8: 14:00 <= 时间 < 16:00
}

impl PointsBreakdown {
    /// 积分合计, 溢出时按 64 位整数回绕
    pub fn total(&self) -> i64 {
        [
            self.retailer_name,
            self.round_total,
            self.quarter_total,
            self.item_pairs,
            self.descriptions,
            self.large_total,
            self.odd_day,
            self.afternoon,
        ]
        .into_iter()
        .fold(0, i64::wrapping_add)
    }
}

/// 计算小票积分
pub fn calculate_points(receipt: &Receipt) -> i64 {
    let breakdown = breakdown(receipt);
    tracing::debug!("Points breakdown for {}: {:?}", receipt.retailer, breakdown);
    breakdown.total()
}

/// 按规则逐项计算积分 (纯函数, 不会失败)
///
/// 金额解析失败时按 0 处理, 日期/时间解析失败时跳过对应规则.
/// 金额使用 f64 计算, 规则3 的取模比较保留浮点语义.
pub fn breakdown(receipt: &Receipt) -> PointsBreakdown {
    let total = parse_amount(&receipt.total);

    PointsBreakdown {
        retailer_name: receipt
            .retailer
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .count() as i64,
        round_total: if total == total as i64 as f64 { 50 } else { 0 },
        quarter_total: if total % 0.25 == 0.0 { 25 } else { 0 },
        item_pairs: (receipt.items.len() / 2) as i64 * 5,
        descriptions: receipt
            .items
            .iter()
            .map(description_points)
            .fold(0, i64::wrapping_add),
        large_total: if total > 10.00 { 5 } else { 0 },
        odd_day: match parse_purchase_date(&receipt.purchase_date) {
            Some(date) if date.day() % 2 == 1 => 6,
            _ => 0,
        },
        afternoon: match parse_purchase_time(&receipt.purchase_time) {
            Some(time) if matches!(time.hour(), 14 | 15) => 10,
            _ => 0,
        },
    }
}

fn description_points(item: &Item) -> i64 {
    // 按字节长度判断
    if item.short_description.trim().len() % 3 != 0 {
        return 0;
    }
    (parse_amount(&item.price) * 0.2).ceil() as i64
}

/// 解析金额文本, 失败时返回 0
pub fn parse_amount(value: &str) -> f64 {
    value.parse::<f64>().unwrap_or(0.0)
}

/// 解析 `YYYY-MM-DD` 格式的购买日期
pub fn parse_purchase_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// 解析 24 小时制 `HH:MM` 购买时间 (小时可为一位, 分钟必须两位)
pub fn parse_purchase_time(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.split_once(':')?;
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&hour.len()) || minute.len() != 2 || !digits(hour) || !digits(minute) {
        return None;
    }
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}
