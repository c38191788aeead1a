//! Generic list and create views
//!
//! Implement [`ListView`] or [`CreateView`] and register the value wrapped
//! in [`ListPage`] or [`CreatePage`].

use crate::core::site::Site;
use crate::domain::Result;
use crate::routing::{Handler, Method, Request, Response};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Context key holding a list view's objects
pub const OBJECTS_LIST: &str = "objects_list";

/// Renders one template with a list of objects
#[async_trait]
pub trait ListView: Send + Sync {
    fn template_name(&self) -> &str;

    fn context_object_name(&self) -> &str {
        OBJECTS_LIST
    }

    /// The objects to list, already serialized
    async fn queryset(&self, site: &Site) -> Result<Value>;
}

/// Renders a form on GET and creates an object on POST
///
/// Both methods render the same template with [`CreateView::context`].
#[async_trait]
pub trait CreateView: Send + Sync {
    fn template_name(&self) -> &str;

    async fn context(&self, _site: &Site) -> Result<Map<String, Value>> {
        Ok(Map::new())
    }

    /// Builds and stores the object described by the form data
    async fn create(&self, site: &Site, request: &Request) -> Result<()>;
}

/// [`Handler`] adapter for a [`ListView`]
pub struct ListPage<V>(pub V);

#[async_trait]
impl<V: ListView> Handler for ListPage<V> {
    async fn handle(&self, site: &Site, _request: &Request) -> Result<Response> {
        let view = &self.0;
        let mut context = Map::new();
        context.insert(
            view.context_object_name().to_string(),
            view.queryset(site).await?,
        );
        let body = site.render(view.template_name(), &Value::Object(context))?;
        Ok(Response::ok(body))
    }
}

/// [`Handler`] adapter for a [`CreateView`]
pub struct CreatePage<V>(pub V);

#[async_trait]
impl<V: CreateView> Handler for CreatePage<V> {
    async fn handle(&self, site: &Site, request: &Request) -> Result<Response> {
        let view = &self.0;
        if request.method == Method::Post {
            view.create(site, request).await?;
        }
        let context = view.context(site).await?;
        let body = site.render(view.template_name(), &Value::Object(context))?;
        Ok(Response::ok(body))
    }
}
