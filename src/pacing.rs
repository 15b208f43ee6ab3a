//! リクエスト間隔の擬人化
//!
//! 固定間隔のリクエストはボット検知のシグネチャになるため、待機時間は
//! 設定レンジからの一様乱数で決める。テストでは `NoPacing` を注入して
//! 決定的に実行する。

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;

/// 注入可能な遅延戦略
#[async_trait]
pub trait Pacing: Send + Sync {
    /// `[min, max]` からランダムに選んだ時間だけ待機
    async fn pause(&self, min: Duration, max: Duration);
}

/// 人間の閲覧を模したランダム遅延
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanPacing;

#[async_trait]
impl Pacing for HumanPacing {
    async fn pause(&self, min: Duration, max: Duration) {
        let min_ms = min.as_millis() as u64;
        let max_ms = max.as_millis() as u64;

        // ThreadRngはSendではないのでawait前に値を確定させる
        let wait_ms = if max_ms > min_ms {
            rand::rng().random_range(min_ms..=max_ms)
        } else {
            min_ms
        };

        sleep(Duration::from_millis(wait_ms)).await;
    }
}

/// 遅延なし（テスト用）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacing for NoPacing {
    async fn pause(&self, _min: Duration, _max: Duration) {}
}
