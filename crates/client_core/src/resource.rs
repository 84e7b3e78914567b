//! One generic client for every backend collection.
//!
//! A [`Resource`] names its base path and payload types; the marker traits
//! decide which operations a [`ResourceClient`] offers for it. Logs only
//! implement [`Resource`], so they can be listed and nothing else.

use std::{fmt, marker::PhantomData};

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    domain::{BackupLog, Destination, DestinationId, LogId, Server, ServerId, Task, TaskId},
    protocol::{Ack, DestinationRequest, EnabledPatch, Page, Saved, ServerRequest, TaskRequest},
};
use url::Url;

use crate::{
    error::Result,
    query::{LogQuery, PageQuery, QueryParams, ServerQuery},
    transport::{decode, ApiClient},
};

pub trait Resource {
    /// Path segment under the api base, e.g. `servers`.
    const PATH: &'static str;
    type Id: fmt::Display + Copy;
    type Record: DeserializeOwned;
    type Query: QueryParams;
}

/// `GET /<resource>/<id>`.
pub trait Readable: Resource {}

/// `POST`, `PUT` and `DELETE`.
pub trait Writable: Readable {
    type Request: Serialize;
}

/// `POST /<resource>/<id>/execute`.
pub trait Executable: Resource {}

/// `PUT /<resource>/<id>` with only `{"enabled": ..}`.
pub trait Switchable: Writable {}

/// `PATCH /<resource>/<id>/toggle`.
pub trait Toggleable: Resource {}

#[derive(Debug, Clone, Copy)]
pub struct Servers;

#[derive(Debug, Clone, Copy)]
pub struct Destinations;

#[derive(Debug, Clone, Copy)]
pub struct Tasks;

#[derive(Debug, Clone, Copy)]
pub struct Logs;

impl Resource for Servers {
    const PATH: &'static str = "servers";
    type Id = ServerId;
    type Record = Server;
    type Query = ServerQuery;
}
impl Readable for Servers {}
impl Writable for Servers {
    type Request = ServerRequest;
}
impl Switchable for Servers {}

impl Resource for Destinations {
    const PATH: &'static str = "destinations";
    type Id = DestinationId;
    type Record = Destination;
    type Query = PageQuery;
}
impl Readable for Destinations {}
impl Writable for Destinations {
    type Request = DestinationRequest;
}
impl Switchable for Destinations {}
impl Toggleable for Destinations {}

impl Resource for Tasks {
    const PATH: &'static str = "tasks";
    type Id = TaskId;
    type Record = Task;
    type Query = PageQuery;
}
impl Readable for Tasks {}
impl Writable for Tasks {
    type Request = TaskRequest;
}
impl Executable for Tasks {}
impl Switchable for Tasks {}

impl Resource for Logs {
    const PATH: &'static str = "logs";
    type Id = LogId;
    type Record = BackupLog;
    type Query = LogQuery;
}

pub struct ResourceClient<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> fmt::Debug for ResourceClient<R>
where
    R: Resource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("path", &R::PATH)
            .field("base", &self.api.base().as_str())
            .finish()
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn collection_url(&self, query: &R::Query) -> Url {
        self.api.endpoint(&[R::PATH], &query.pairs())
    }

    pub fn member_url(&self, id: R::Id) -> Url {
        let id = id.to_string();
        self.api.endpoint(&[R::PATH, id.as_str()], &[])
    }

    fn action_url(&self, id: R::Id, action: &str) -> Url {
        let id = id.to_string();
        self.api.endpoint(&[R::PATH, id.as_str(), action], &[])
    }

    /// One page of records.
    pub async fn list(&self, query: &R::Query) -> Result<Page<R::Record>> {
        decode(self.list_raw(query).await?)
    }

    /// The list response exactly as the backend sent it.
    pub async fn list_raw(&self, query: &R::Query) -> Result<Value> {
        self.api.get_json(self.collection_url(query)).await
    }
}

impl<R: Readable> ResourceClient<R> {
    pub async fn get(&self, id: R::Id) -> Result<R::Record> {
        decode(self.api.get_json(self.member_url(id)).await?)
    }
}

impl<R: Writable> ResourceClient<R> {
    pub async fn create(&self, request: &R::Request) -> Result<Saved<R::Record>> {
        let url = self.collection_url_bare();
        decode(self.api.send_json(Method::POST, url, request).await?)
    }

    pub async fn update(&self, id: R::Id, request: &R::Request) -> Result<Saved<R::Record>> {
        decode(
            self.api
                .send_json(Method::PUT, self.member_url(id), request)
                .await?,
        )
    }

    pub async fn delete(&self, id: R::Id) -> Result<Ack> {
        ack(self.api.send_empty(Method::DELETE, self.member_url(id)).await?)
    }

    fn collection_url_bare(&self) -> Url {
        self.api.endpoint(&[R::PATH], &[])
    }
}

impl<R: Switchable> ResourceClient<R> {
    /// Tasks may answer with the scheduler warning envelope, as on update.
    pub async fn set_enabled(&self, id: R::Id, enabled: bool) -> Result<Saved<R::Record>> {
        let patch = EnabledPatch { enabled };
        decode(
            self.api
                .send_json(Method::PUT, self.member_url(id), &patch)
                .await?,
        )
    }
}

impl<R: Executable> ResourceClient<R> {
    /// Asks the backend to run the record now. Returns once the run has been
    /// accepted, not when it finishes.
    pub async fn execute(&self, id: R::Id) -> Result<Ack> {
        ack(self
            .api
            .send_empty(Method::POST, self.action_url(id, "execute"))
            .await?)
    }
}

impl<R: Toggleable> ResourceClient<R> {
    pub async fn toggle(&self, id: R::Id) -> Result<Ack> {
        ack(self
            .api
            .send_empty(Method::PATCH, self.action_url(id, "toggle"))
            .await?)
    }
}

fn ack(value: Value) -> Result<Ack> {
    Ok(decode::<Option<Ack>>(value)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/resource_tests.rs"]
mod tests;
