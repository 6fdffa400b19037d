//! NIP 规范化与格式校验

/// NIP 固定长度
pub const NIP_LEN: usize = 10;

/// 校验位权重（前 9 位）
const CHECKSUM_WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

/// 去掉所有非 ASCII 数字字符（连字符、空格、其他标点）
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 仅检查长度与字符类别：非空、全部为数字、长度恰好为 10
pub fn is_valid(nip: &str) -> bool {
    nip.len() == NIP_LEN && nip.bytes().all(|b| b.is_ascii_digit())
}

/// NIP 校验位算法：加权和 mod 11 必须等于第 10 位（余数 10 永远无效）
pub fn checksum_ok(nip: &str) -> bool {
    if !is_valid(nip) {
        return false;
    }

    let digits: Vec<u32> = nip.bytes().map(|b| u32::from(b - b'0')).collect();
    let sum: u32 = CHECKSUM_WEIGHTS
        .iter()
        .zip(digits.iter())
        .map(|(w, d)| w * d)
        .sum();

    let control = sum % 11;
    control != 10 && control == digits[NIP_LEN - 1]
}

/// 可配置的校验器；默认不校验校验位
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NipValidator {
    pub checksum: bool,
}

impl NipValidator {
    pub fn new(checksum: bool) -> Self {
        Self { checksum }
    }

    pub fn accepts(&self, nip: &str) -> bool {
        if self.checksum {
            checksum_ok(nip)
        } else {
            is_valid(nip)
        }
    }
}
