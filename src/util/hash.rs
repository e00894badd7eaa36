/// 小写十六进制的 MD5
pub fn md5_hex(input: &[u8]) -> String {
    let digest = md5::compute(input);
    hex::encode(digest.0)
}

/// OneSky 的 dev_hash：md5(时间戳 + secret)，中间没有分隔符
pub fn dev_hash(timestamp: i64, secret_key: &str) -> String {
    md5_hex(format!("{}{}", timestamp, secret_key).as_bytes())
}
