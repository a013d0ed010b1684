// src/config/consts.rs

// Host bridge
pub const APP_ID: &str = "2006477066-AvryED4B";
pub const ENV_APP_ID: &str = "PROMO_APP_ID";

// Sheet source
pub const DEFAULT_SOURCE: &str = "promos.xlsx";
pub const ENV_SOURCE: &str = "PROMO_SOURCE";
pub const HTTP_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = "promo_cards/0.3";

// Decoder readiness
pub const DECODER_WAIT_MS: u64 = 3000;
pub const DECODER_POLL_MS: u64 = 50;

// Debug log; PROMO_LOG overrides the path, empty turns it off
pub const LOG_FILE: &str = ".store/debug.log";
pub const ENV_LOG: &str = "PROMO_LOG";

// Card defaults
pub const DEFAULT_TITLE: &str = "โปร";
pub const PRICE_DURATION_SEP: &str = " / ";

// Sheet header aliases, production (Thai) header first
pub const COL_CATEGORY: &[&str] = &["หมวดหมู่", "category"];
pub const COL_HEADING: &[&str] = &["หัวcard", "card-heading"];
pub const COL_PROMO_TYPE: &[&str] = &["ประเภทโปรโมชั่น", "promotion-type"];
pub const COL_SPEED: &[&str] = &["ความเร็ว", "speed"];
pub const COL_PRICE_DURATION: &[&str] = &["ราคา/ระยะเวลา", "price/duration"];
pub const COL_PRICE: &[&str] = &["ราคา", "price"];
pub const COL_DURATION: &[&str] = &["ระยะเวลา", "duration"];
pub const COL_BONUS: &[&str] = &["โบนัส", "bonus"];
pub const COL_CODE: &[&str] = &["รหัสสมัคร", "signup-code"];

// User-facing text
pub const MSG_LOADING: &str = "กำลังเชื่อม LIFF และโหลดข้อมูล...";
pub const MSG_NO_PROMOS: &str = "ไม่มีโปรโมชั่นให้แสดง (ตรวจสอบ promos.xlsx)";
pub const MSG_ERROR_PREFIX: &str = "เกิดข้อผิดพลาด: ";
pub const MSG_NO_CODE: &str = "ไม่พบรหัสสมัคร";
pub const MSG_COPIED: &str = "คัดลอกโค้ด: ";
pub const MSG_COPY_MANUAL: &str = "คัดลอกไม่ได้ — โปรดคัดลอกด้วยมือ: ";
pub const LABEL_ALL: &str = "ทั้งหมด";
pub const LABEL_CALL: &str = "📞 สมัครเลย";
pub const LABEL_COPY: &str = "คัดลอกโค้ด";
pub const WINDOW_TITLE: &str = "โปรโมชั่น";
