/*
 * orchestrator.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The theme orchestrator: glue between requests, the CSS engine and the bus.
 */

//! Theme orchestration.
//!
//! [`ThemeOrchestrator`] validates and defaults each request, forwards it
//! to the injected [`CssEngine`], fetches theme content and resources from
//! other plugins over the [`EventBus`], and aggregates the results. It
//! holds no state between operations beyond its collaborators.
//!
//! Ordering: `create_theme` must run before fragments are added to a
//! target, and `finalize_theme` runs once after all append/prepend
//! activity. Fragments within one batch are added concurrently and land
//! in no particular order; callers that need an order should add them one
//! at a time.

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::{Map, Value, json};
use std::sync::Arc;

use themekit_bus::EventBus;
use themekit_template::{PathTemplate, TemplateRenderer};

use crate::config::ThemeConfig;
use crate::engine::CssEngine;
use crate::error::Result;
use crate::operations::ThemeOperations;
use crate::options::CreateThemeOptions;
use crate::pipeline::default_processors;
use crate::reply::{ContentReply, ReplyDiagnostic, content_fragments, resource_bundles};
use crate::types::{
    CssAction, CssFragment, FinalizeOptions, FinalizedTheme, FragmentRequest, TargetSpec,
};

pub struct ThemeOrchestrator {
    engine: Arc<dyn CssEngine>,
    bus: Arc<dyn EventBus>,
    renderer: Arc<dyn TemplateRenderer>,
    config: ThemeConfig,
}

impl ThemeOrchestrator {
    /// Orchestrator with the default path renderer and configuration.
    pub fn new(engine: Arc<dyn CssEngine>, bus: Arc<dyn EventBus>) -> Self {
        Self {
            engine,
            bus,
            renderer: Arc::new(PathTemplate),
            config: ThemeConfig::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_config(mut self, config: ThemeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Add one fragment to a target.
    ///
    /// `action` must be `"append"` or `"prepend"`. The fragment's path is
    /// rendered twice: without data, to register its location with the
    /// engine, and with the request's extra keys, to look up the theme's
    /// content for it. Content replies are forwarded to the engine in
    /// reply order.
    pub async fn css_add(&self, action: &str, request: FragmentRequest) -> Result<()> {
        let action: CssAction = action.parse()?;
        self.add_fragment(action, request).await
    }

    async fn add_fragment(&self, action: CssAction, request: FragmentRequest) -> Result<()> {
        request.validate()?;
        let structural = self.renderer.render(&request.file_path, &Map::new())?;
        let themed = self.renderer.render(&request.file_path, &request.vars)?;

        tracing::debug!(
            css_target = %request.name,
            action = %action,
            file_path = %structural,
            "Adding CSS fragment"
        );

        self.forward(
            action,
            CssFragment {
                name: request.name.clone(),
                dir_name: request.dir_name.clone(),
                file_path: structural,
                silent: request.silent,
            },
        )
        .await?;

        let event = &self.config.events.content;
        let lookup = json!({
            "name": request.name,
            "filePath": themed,
            "silent": request.silent,
        });
        let reply = self.bus.request(event, lookup).await?;

        match content_fragments(event, &request.name, reply)? {
            ContentReply::Missing => {}
            ContentReply::Fragments(fragments) => {
                for fragment in fragments {
                    self.forward(action, fragment).await?;
                }
            }
            ContentReply::Unexpected(diagnostic) => {
                self.report(&diagnostic, request.silent).await;
            }
        }
        Ok(())
    }

    /// Run a batch concurrently and wait for every member.
    ///
    /// Members that already touched the engine are not undone when a
    /// sibling fails. The first error in batch order is returned.
    async fn add_all(&self, action: CssAction, requests: Vec<FragmentRequest>) -> Result<()> {
        tracing::debug!(action = %action, count = requests.len(), "Adding CSS fragment batch");
        let results = join_all(
            requests
                .into_iter()
                .map(|request| self.add_fragment(action, request)),
        )
        .await;
        results.into_iter().collect()
    }

    async fn forward(&self, action: CssAction, fragment: CssFragment) -> Result<()> {
        tracing::trace!(
            css_target = %fragment.name,
            action = %action,
            file_path = %fragment.file_path,
            "Forwarding fragment to engine"
        );
        match action {
            CssAction::Append => self.engine.append(fragment).await?,
            CssAction::Prepend => self.engine.prepend(fragment).await?,
        }
        Ok(())
    }

    async fn report(&self, diagnostic: &ReplyDiagnostic, silent: bool) {
        if silent {
            tracing::debug!(%diagnostic, "Ignoring unexpected reply");
            return;
        }
        tracing::warn!(%diagnostic, "Ignoring unexpected reply");
        self.bus
            .publish(&self.config.events.diagnostic, json!(diagnostic.to_string()))
            .await;
    }
}

#[async_trait]
impl ThemeOperations for ThemeOrchestrator {
    async fn create_theme(&self, options: CreateThemeOptions) -> Result<()> {
        options.files.validate()?;
        let processors = options
            .processors
            .clone()
            .unwrap_or_else(|| default_processors(options.source_map, options.debug));

        for name in options.files.names() {
            tracing::debug!(
                css_target = %name,
                processors = processors.len(),
                source_map = options.source_map,
                "Creating CSS target"
            );
            self.engine
                .create(TargetSpec {
                    name: name.clone(),
                    output: name.clone(),
                    source_map: options.source_map,
                    processors: processors.clone(),
                    silent: options.silent,
                })
                .await?;
        }
        Ok(())
    }

    async fn css_append(&self, request: FragmentRequest) -> Result<()> {
        self.add_fragment(CssAction::Append, request).await
    }

    async fn css_prepend(&self, request: FragmentRequest) -> Result<()> {
        self.add_fragment(CssAction::Prepend, request).await
    }

    async fn css_append_all(&self, requests: Vec<FragmentRequest>) -> Result<()> {
        self.add_all(CssAction::Append, requests).await
    }

    async fn css_prepend_all(&self, requests: Vec<FragmentRequest>) -> Result<()> {
        self.add_all(CssAction::Prepend, requests).await
    }

    async fn finalize_theme(&self, options: FinalizeOptions) -> Result<FinalizedTheme> {
        let event = &self.config.events.resources;
        let reply = self.bus.request(event, Value::Null).await?;
        let bundles = resource_bundles(event, reply)?;
        tracing::debug!(bundles = bundles.len(), "Finalizing theme");

        let mut copy = Vec::new();
        for bundle in bundles {
            for fragment in bundle.append {
                self.forward(CssAction::Append, fragment).await?;
            }
            for fragment in bundle.prepend {
                self.forward(CssAction::Prepend, fragment).await?;
            }
            copy.extend(bundle.copy);
        }

        let css = self.engine.finalize_all(options).await?;
        tracing::debug!(targets = css.len(), copy = copy.len(), "Theme finalized");
        Ok(FinalizedTheme { css, copy })
    }
}
