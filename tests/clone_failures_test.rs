//! Fatal clone outcomes
//!
//! A failed run returns a typed error and leaves the user unlinked.

mod common;

use std::sync::Arc;

use anyhow::{Context, Result};

use common::{cloner_for, TamperedStore, TemplateBuilder, TestEnv};
use workspace_cloner::cloner::CloneStage;
use workspace_cloner::errors::CloneError;
use workspace_cloner::store::CloneStore;

#[tokio::test]
async fn test_datasource_without_id_is_invalid_template() -> Result<()> {
    let env = TestEnv::new().await?;
    let template = TemplateBuilder::new(env.store.as_ref()).await?;
    template.datasource("Orders DB", false).await?;
    let app = template.application("Orders", true, false).await?;
    let p1 = template.page(&app, "P1").await?;
    template.set_pages(app, &[&p1], None).await?;

    let user = env.create_user("ada@example.com").await?;
    let user_id = user.id.clone().context("user id")?;
    let store: Arc<dyn CloneStore> =
        Arc::new(TamperedStore::new(env.store.clone()).strip_datasource_ids());

    let err = cloner_for(store)
        .clone_workspace_for_user(&template.workspace_id, user)
        .await
        .unwrap_err();

    assert!(err.is_template_error());
    assert_eq!(err.error_code(), "INVALID_TEMPLATE");
    assert!(matches!(err, CloneError::DatasourceSet(_)));

    let user = env.store.find_user(&user_id).await?.context("user")?;
    assert!(!user.has_examples_workspace());
    Ok(())
}

#[tokio::test]
async fn test_action_waiting_on_invalid_datasources_fails() -> Result<()> {
    let env = TestEnv::new().await?;
    let template = TemplateBuilder::new(env.store.as_ref()).await?;
    let d1 = template.datasource("Orders DB", false).await?;
    let app = template.application("Orders", true, false).await?;
    let p1 = template.page(&app, "P1").await?;
    template.set_pages(app, &[&p1], None).await?;
    template.shared_action(&p1, "A1", &d1).await?;

    let user = env.create_user("grace@example.com").await?;
    let store: Arc<dyn CloneStore> =
        Arc::new(TamperedStore::new(env.store.clone()).strip_datasource_ids());

    let err = cloner_for(store)
        .clone_workspace_for_user(&template.workspace_id, user)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "INVALID_TEMPLATE");
    assert!(err.to_string().contains("Orders DB"));
    Ok(())
}

#[tokio::test]
async fn test_reference_to_uncloned_datasource_is_fatal() -> Result<()> {
    let env = TestEnv::new().await?;
    let template = TemplateBuilder::new(env.store.as_ref()).await?;
    let retired = template.datasource("Retired DB", true).await?;
    let retired_id = retired.id.clone().context("datasource id")?;
    let app = template.application("Orders", true, false).await?;
    let p1 = template.page(&app, "P1").await?;
    template.set_pages(app, &[&p1], None).await?;
    let a1 = template.shared_action_to(&p1, "A1", &retired_id).await?;

    let user = env.create_user("linus@example.com").await?;
    let user_id = user.id.clone().context("user id")?;
    let err = env
        .cloner()
        .clone_workspace_for_user(&template.workspace_id, user)
        .await
        .unwrap_err();

    match err {
        CloneError::UnresolvedDatasource {
            action_id,
            datasource_id,
        } => {
            assert_eq!(Some(action_id), a1.id);
            assert_eq!(datasource_id, retired_id);
        }
        other => panic!("expected unresolved datasource, got {other:?}"),
    }

    let user = env.store.find_user(&user_id).await?.context("user")?;
    assert!(!user.has_examples_workspace());
    Ok(())
}

#[tokio::test]
async fn test_unknown_user_is_an_error() -> Result<()> {
    let env = TestEnv::new().await?;
    let err = env
        .cloner()
        .clone_examples_workspace("no-such-user")
        .await
        .unwrap_err();

    assert!(matches!(err, CloneError::UserNotFound(ref id) if id == "no-such-user"));
    assert_eq!(err.error_code(), "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn test_decryption_failure_is_fatal() -> Result<()> {
    let env = TestEnv::new().await?;
    let template = TemplateBuilder::new(env.store.as_ref()).await?;
    let mut broken = template.datasource("Broken DB", false).await?;
    if let Some(authentication) = broken.authentication_mut() {
        authentication.password = Some("%%% not base64 %%%".to_string());
        authentication.is_encrypted = true;
    }
    env.store.save_datasource(broken).await?;

    let user = env.create_user("barbara@example.com").await?;
    let err = env
        .cloner()
        .clone_workspace_for_user(&template.workspace_id, user)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "DECRYPTION_FAILED");
    Ok(())
}

#[test]
fn test_stage_order_is_enforced() {
    assert!(CloneStage::NotStarted.can_advance_to(CloneStage::Skipped));
    assert!(!CloneStage::GraphStreaming.can_advance_to(CloneStage::Done));
    assert!(!CloneStage::Done.can_advance_to(CloneStage::Skipped));
}
