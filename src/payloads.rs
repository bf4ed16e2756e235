// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Pulse Security - Payload Catalog
 * Static attack payloads and detection signatures per vulnerability category
 *
 * @copyright 2026 Pulse Security Oy
 * @license Proprietary
 */

/// SQL injection probe payloads, in probing order
const SQLI_PAYLOADS: &[&str] = &[
    "' OR '1'='1",
    "' OR '1'='1'--",
    "1' OR '1'='1",
    "admin'--",
    "' UNION SELECT NULL--",
];

/// Reflected XSS probe payloads, in probing order
const XSS_PAYLOADS: &[&str] = &[
    "<script>alert('XSS')</script>",
    "<img src=x onerror=alert('XSS')>",
    "javascript:alert('XSS')",
    "<svg onload=alert('XSS')>",
];

/// Database error substrings matched (lowercased) against response bodies
const SQL_ERROR_SIGNATURES: &[&str] = &[
    "sql syntax",
    "mysql",
    "postgresql",
    "sqlite",
    "ora-",
    "sql error",
    "sql exception",
    "database error",
];

/// SQL injection payloads in catalog order
pub fn sqli_payloads() -> &'static [&'static str] {
    SQLI_PAYLOADS
}

/// XSS payloads in catalog order
pub fn xss_payloads() -> &'static [&'static str] {
    XSS_PAYLOADS
}

/// Error signatures that classify a response as a database error leak
pub fn sql_error_signatures() -> &'static [&'static str] {
    SQL_ERROR_SIGNATURES
}
