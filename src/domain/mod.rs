//! In-memory representation of a workspace graph.
//!
//! These types are what the cloner reads, mutates and writes back. The
//! database layer stores them as rows with JSON columns for the nested parts
//! (see `database::entities`).

pub mod action;
pub mod application;
pub mod datasource;
pub mod policy;
pub mod user;
pub mod workspace;

pub use action::{Action, ActionDatasource, DatasourceRef};
pub use application::{ActionReference, Application, ApplicationPage, Layout, Page, ReferenceGroup};
pub use datasource::{Authentication, Datasource, DatasourceConfiguration};
pub use policy::Policy;
pub use user::User;
pub use workspace::{UserRole, Workspace};
