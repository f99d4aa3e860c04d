use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use crate::domain::{
    Action, ActionDatasource, ActionReference, Application, ApplicationPage, Authentication,
    Datasource, DatasourceConfiguration, DatasourceRef, Layout, Page, Policy, ReferenceGroup,
    Workspace,
};
use crate::identity::fresh_id;
use crate::services::{Base64SecretCodec, ConfigService};
use crate::store::CloneStore;

pub const TEMPLATE_WORKSPACE_NAME: &str = "Examples";

/// Creates the sample template workspace and registers it as the template.
///
/// Returns the id of the template workspace. Does nothing when a template is
/// already configured and still exists.
pub async fn create_template_workspace(
    store: Arc<dyn CloneStore>,
    codec: &Base64SecretCodec,
) -> Result<String> {
    let config = ConfigService::new(store.clone());
    if let Some(existing) = config.template_workspace_id().await? {
        if store.find_workspace(&existing).await?.is_some() {
            info!("Template workspace {} already exists, skipping seed data creation", existing);
            return Ok(existing);
        }
    }

    info!("Creating template workspace: {}", TEMPLATE_WORKSPACE_NAME);
    let mut workspace = Workspace::new(TEMPLATE_WORKSPACE_NAME);
    workspace.slug = Some("examples".to_string());
    workspace.policies = vec![Policy::for_user("manage:workspace", "template@example.com")];
    let workspace = store.save_workspace(workspace).await?;
    let workspace_id = workspace.id.clone().context("template workspace has no id")?;

    let movies_db = create_example_datasources(store.as_ref(), codec, &workspace_id).await?;
    create_movie_library(store.as_ref(), &workspace_id, &movies_db).await?;
    create_hidden_applications(store.as_ref(), &workspace_id).await?;

    config.set_template_workspace_id(&workspace_id).await?;
    info!("Successfully created template workspace {}", workspace_id);
    Ok(workspace_id)
}

async fn create_example_datasources(
    store: &dyn CloneStore,
    codec: &Base64SecretCodec,
    workspace_id: &str,
) -> Result<Datasource> {
    info!("Creating example datasources...");

    let mut authentication = Authentication {
        auth_type: "basic".to_string(),
        username: Some("reader".to_string()),
        password: Some("movies-secret".to_string()),
        is_encrypted: false,
    };
    codec.encrypt_authentication(&mut authentication);

    let movies_db = store
        .save_datasource(Datasource {
            name: "Movies DB".to_string(),
            workspace_id: Some(workspace_id.to_string()),
            plugin_id: Some("postgres-plugin".to_string()),
            configuration: Some(DatasourceConfiguration {
                url: Some("postgres://movies.example.com:5432/movies".to_string()),
                authentication: Some(authentication),
                properties: [("ssl".to_string(), "require".to_string())].into(),
            }),
            ..Default::default()
        })
        .await?;

    store
        .save_datasource(Datasource {
            name: "Public API".to_string(),
            workspace_id: Some(workspace_id.to_string()),
            plugin_id: Some("restapi-plugin".to_string()),
            configuration: Some(DatasourceConfiguration {
                url: Some("https://api.example.com".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        })
        .await?;

    Ok(movies_db)
}

async fn create_movie_library(
    store: &dyn CloneStore,
    workspace_id: &str,
    movies_db: &Datasource,
) -> Result<()> {
    info!("Creating example application: Movie Library");

    let movies_ref = DatasourceRef::of(movies_db).context("movies datasource has no id")?;
    let mut application = store
        .save_application(Application {
            name: "Movie Library".to_string(),
            workspace_id: workspace_id.to_string(),
            is_public: true,
            ..Default::default()
        })
        .await?;
    let application_id = application.id.clone().context("application has no id")?;

    let home = save_page(store, &application_id, "Home").await?;
    let details = save_page(store, &application_id, "Movie Details").await?;

    let list_movies = save_action(
        store,
        workspace_id,
        &home,
        "ListMovies",
        Some(ActionDatasource::Shared(movies_ref.clone())),
        json!({"body": "SELECT * FROM movies ORDER BY title LIMIT 20"}),
    )
    .await?;
    let greeting = save_action(
        store,
        workspace_id,
        &home,
        "Greeting",
        Some(ActionDatasource::Inline(Datasource {
            name: "JS Function".to_string(),
            plugin_id: Some("js-plugin".to_string()),
            ..Default::default()
        })),
        json!({"body": "return `Welcome back`"}),
    )
    .await?;
    let movie_details = save_action(
        store,
        workspace_id,
        &details,
        "MovieDetails",
        Some(ActionDatasource::Shared(movies_ref)),
        json!({"body": "SELECT * FROM movies WHERE id = {{appsmith.URL.queryParams.id}}"}),
    )
    .await?;

    set_on_load_actions(
        store,
        home.clone(),
        vec![group(&[&list_movies]), group(&[&greeting])],
        vec![group(&[&list_movies])],
    )
    .await?;
    set_on_load_actions(
        store,
        details.clone(),
        vec![group(&[&movie_details, &list_movies])],
        vec![group(&[&movie_details])],
    )
    .await?;

    application.pages = vec![
        ApplicationPage {
            id: page_id(&home)?,
            is_default: false,
        },
        ApplicationPage {
            id: page_id(&details)?,
            is_default: true,
        },
    ];
    store.save_application(application).await?;
    Ok(())
}

async fn create_hidden_applications(store: &dyn CloneStore, workspace_id: &str) -> Result<()> {
    info!("Creating private and deleted example applications...");

    for (name, is_public, deleted) in [("Admin Console", false, false), ("Retired App", true, true)] {
        let mut application = store
            .save_application(Application {
                name: name.to_string(),
                workspace_id: workspace_id.to_string(),
                is_public,
                deleted,
                ..Default::default()
            })
            .await?;
        let application_id = application.id.clone().context("application has no id")?;
        let page = save_page(store, &application_id, "Main").await?;
        application.pages = vec![ApplicationPage {
            id: page_id(&page)?,
            is_default: true,
        }];
        store.save_application(application).await?;
    }
    Ok(())
}

async fn save_page(store: &dyn CloneStore, application_id: &str, name: &str) -> Result<Page> {
    let page = store
        .save_page(Page {
            name: name.to_string(),
            application_id: application_id.to_string(),
            layouts: vec![Layout {
                id: fresh_id(),
                dsl: Some(json!({"widgetName": "MainContainer", "children": []})),
                ..Default::default()
            }],
            ..Default::default()
        })
        .await?;
    Ok(page)
}

async fn save_action(
    store: &dyn CloneStore,
    workspace_id: &str,
    page: &Page,
    name: &str,
    datasource: Option<ActionDatasource>,
    configuration: serde_json::Value,
) -> Result<Action> {
    let action = store
        .save_action(Action {
            name: name.to_string(),
            page_id: page_id(page)?,
            workspace_id: workspace_id.to_string(),
            collection_id: Some("example-collection".to_string()),
            datasource,
            action_configuration: Some(configuration),
            ..Default::default()
        })
        .await?;
    Ok(action)
}

async fn set_on_load_actions(
    store: &dyn CloneStore,
    mut page: Page,
    draft: Vec<ReferenceGroup>,
    published: Vec<ReferenceGroup>,
) -> Result<()> {
    if let Some(layout) = page.layouts.first_mut() {
        layout.layout_on_load_actions = draft;
        layout.published_layout_on_load_actions = published;
    }
    store.save_page(page).await?;
    Ok(())
}

fn group(actions: &[&Action]) -> ReferenceGroup {
    actions
        .iter()
        .filter_map(|action| {
            action
                .id
                .as_ref()
                .map(|id| ActionReference::new(id.clone(), action.name.clone()))
        })
        .collect()
}

fn page_id(page: &Page) -> Result<String> {
    page.id.clone().context("page has no id")
}
