/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth (Bearer 検証), http (横断的な transport 設定)
 */
pub mod auth;
pub mod http;
