use chrono::{DateTime, Duration};
use shiori_core::application::commands::articles::RECONCILE_BATCH_SIZE;
use shiori_core::application::ports::time::Clock;
use shiori_core::domain::article::ArticleStatus;
use shiori_core::infrastructure::reconciler::SearchIndexReconciler;
use std::sync::Arc;

mod support;

use support::{ArticleBuilder, TestApp, fixed_now};

/// 照合処理はストアの状態に合わせてインデックスを修復する
#[tokio::test]
async fn reconcile_repairs_missing_and_stale_documents() {
    let app = TestApp::new();
    app.articles.seed(ArticleBuilder::new(1).build());
    app.articles
        .seed(ArticleBuilder::new(2).visibility("private").build());
    app.articles
        .seed(ArticleBuilder::new(3).status(ArticleStatus::Deleted).build());

    let report = app
        .services
        .article_commands
        .reconcile_search_index(DateTime::UNIX_EPOCH)
        .await
        .unwrap();

    assert_eq!(report.scanned, 3);
    assert_eq!(report.upserted, 1);
    assert_eq!(report.removed, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(app.index.ids(), vec![1]);
}

/// 作成時にインデックスへ書けなかった記事も次の照合で反映される
#[tokio::test]
async fn reconcile_recovers_a_failed_create() {
    let app = TestApp::new();
    let alice = app.requester("alice").await;
    app.index.fail(true);

    let command = shiori_core::application::commands::articles::CreateArticleCommand::builder()
        .title("Recovered later")
        .content("body")
        .category_id(1)
        .build()
        .unwrap();
    assert!(
        app.services
            .article_commands
            .create_article(&alice, command)
            .await
            .is_err()
    );
    assert!(app.index.ids().is_empty());

    app.index.fail(false);
    app.services
        .article_commands
        .reconcile_search_index(fixed_now() - Duration::minutes(5))
        .await
        .unwrap();
    assert_eq!(app.index.ids(), vec![1]);
}

/// 透かし以前に更新された行は走査しない
#[tokio::test]
async fn reconcile_only_scans_rows_changed_since_the_watermark() {
    let app = TestApp::new();
    app.articles.seed(
        ArticleBuilder::new(1)
            .created_at(fixed_now() - Duration::days(3))
            .build(),
    );
    app.articles.seed(ArticleBuilder::new(2).title("recent").build());

    let report = app
        .services
        .article_commands
        .reconcile_search_index(fixed_now() - Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(report.scanned, 1);
    assert_eq!(app.index.ids(), vec![2]);
}

/// バッチ境界をまたいでも全件を一度ずつ処理する
#[tokio::test]
async fn reconcile_walks_across_batches() {
    let app = TestApp::new();
    let total = RECONCILE_BATCH_SIZE * 2 + 5;
    for id in 1..=total {
        app.articles.seed(
            ArticleBuilder::new(id)
                .title(&format!("bulk {id}"))
                .created_at(fixed_now() + Duration::seconds(id % 7))
                .build(),
        );
    }

    let report = app
        .services
        .article_commands
        .reconcile_search_index(DateTime::UNIX_EPOCH)
        .await
        .unwrap();

    assert_eq!(report.scanned, total as u64);
    assert_eq!(report.upserted, total as u64);
    assert_eq!(app.index.ids().len(), total as usize);
}

/// インデックス障害は失敗件数として数え、処理は継続する
#[tokio::test]
async fn reconcile_counts_index_failures() {
    let app = TestApp::new();
    app.articles.seed(ArticleBuilder::new(1).build());
    app.articles.seed(ArticleBuilder::new(2).title("two").build());
    app.index.fail(true);

    let report = app
        .services
        .article_commands
        .reconcile_search_index(DateTime::UNIX_EPOCH)
        .await
        .unwrap();

    assert_eq!(report.scanned, 2);
    assert_eq!(report.failed, 2);
    assert_eq!(report.upserted, 0);
}

fn reconciler(app: &TestApp) -> SearchIndexReconciler {
    SearchIndexReconciler::new(
        Arc::clone(&app.services.article_commands),
        Arc::clone(&app.clock) as Arc<dyn Clock>,
        std::time::Duration::from_secs(300),
    )
}

/// 連続して失敗した行も、インデックス復旧後の照合で反映される
#[tokio::test]
async fn repeated_failures_do_not_skip_rows() {
    let app = TestApp::new();
    app.articles.seed(
        ArticleBuilder::new(1)
            .created_at(fixed_now() + Duration::seconds(10))
            .build(),
    );
    let reconciler = reconciler(&app);
    app.clock.advance(Duration::seconds(20));

    app.index.fail(true);
    let mut watermark = DateTime::UNIX_EPOCH;
    for _ in 0..3 {
        watermark = reconciler.sweep(watermark).await;
        assert!(watermark <= fixed_now() + Duration::seconds(10));
        app.clock.advance(Duration::seconds(300));
    }
    assert!(!app.index.contains(1));

    app.index.fail(false);
    watermark = reconciler.sweep(watermark).await;
    assert!(app.index.contains(1));
    assert_eq!(watermark, app.clock.now() - Duration::seconds(300));
}

/// 失敗がなければ透かしは開始時刻から一周期分だけ戻った位置に進む
#[tokio::test]
async fn clean_sweeps_advance_the_watermark() {
    let app = TestApp::new();
    app.articles.seed(ArticleBuilder::new(1).build());
    let reconciler = reconciler(&app);
    app.clock.advance(Duration::hours(1));

    let watermark = reconciler.sweep(DateTime::UNIX_EPOCH).await;
    assert_eq!(watermark, fixed_now() + Duration::minutes(55));
    assert!(app.index.contains(1));
}
