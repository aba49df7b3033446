//! Translation of lifecycle events into index writes.

use std::sync::Arc;

use futures::future::{join_all, try_join_all};
use tracing::{debug, info, instrument, warn};

use super::LifecycleEvent;
use crate::errors::BridgeError;
use crate::host::ForumRepository;
use crate::loader::IndexLoader;
use crate::settings::SettingsManager;
use forum_search_shared::{IndexDocument, PostFields, PostId, TopicFields, TopicId};

/// Outcome of a full reindex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReindexSummary {
    /// Number of topics enumerated.
    pub topics: usize,
    /// Number of documents written.
    pub documents: usize,
}

/// Mirrors forum content changes into the search index.
///
/// While indexing is disabled every handler returns immediately, without
/// touching the host or the engine.
pub struct EventAdapter {
    settings: Arc<SettingsManager>,
    forum: Arc<dyn ForumRepository>,
    loader: Arc<IndexLoader>,
}

impl EventAdapter {
    pub fn new(
        settings: Arc<SettingsManager>,
        forum: Arc<dyn ForumRepository>,
        loader: Arc<IndexLoader>,
    ) -> Self {
        Self {
            settings,
            forum,
            loader,
        }
    }

    /// Dispatch a lifecycle event to its handler.
    pub async fn handle(&self, event: &LifecycleEvent) -> Result<(), BridgeError> {
        debug!(event = event.name(), "Handling lifecycle event");
        match event {
            LifecycleEvent::PostSave(post) => self.on_post_save(post).await,
            LifecycleEvent::PostEdit(post) => self.on_post_edit(post).await,
            LifecycleEvent::PostRestore(post) => self.on_post_restore(post).await,
            LifecycleEvent::PostDelete(pid) => self.on_post_delete(*pid).await,
            LifecycleEvent::TopicPost(topic) => self.on_topic_post(topic).await,
            LifecycleEvent::TopicRestore(topic) => self.on_topic_restore(topic).await,
            LifecycleEvent::TopicEdit(topic) => self.on_topic_edit(topic).await,
            LifecycleEvent::TopicDelete(tid) => self.on_topic_delete(*tid).await,
        }
    }

    pub async fn on_post_save(&self, post: &PostFields) -> Result<(), BridgeError> {
        if !self.settings.is_enabled().await {
            return Ok(());
        }
        self.index_post(post).await
    }

    pub async fn on_post_edit(&self, post: &PostFields) -> Result<(), BridgeError> {
        self.on_post_save(post).await
    }

    pub async fn on_post_restore(&self, post: &PostFields) -> Result<(), BridgeError> {
        self.on_post_save(post).await
    }

    pub async fn on_post_delete(&self, pid: PostId) -> Result<(), BridgeError> {
        if !self.settings.is_enabled().await {
            return Ok(());
        }
        self.loader.remove(pid).await
    }

    /// Index every post of a newly created topic.
    #[instrument(skip(self, topic), fields(tid = topic.tid))]
    pub async fn on_topic_post(&self, topic: &TopicFields) -> Result<(), BridgeError> {
        if !self.settings.is_enabled().await {
            return Ok(());
        }
        let documents = self.topic_documents(topic).await?;
        self.loader.add(&documents).await
    }

    pub async fn on_topic_restore(&self, topic: &TopicFields) -> Result<(), BridgeError> {
        self.on_topic_post(topic).await
    }

    /// Re-index the main post with the topic's updated title.
    pub async fn on_topic_edit(&self, topic: &TopicFields) -> Result<(), BridgeError> {
        if !self.settings.is_enabled().await {
            return Ok(());
        }

        let main_pid = match topic.main_pid() {
            Some(pid) => Some(pid),
            None => self
                .forum
                .get_topic_main_pid(topic.tid)
                .await?
                .filter(|pid| *pid != 0),
        };
        let Some(main_pid) = main_pid else {
            debug!(tid = topic.tid, "Topic has no main post, nothing to re-index");
            return Ok(());
        };

        let document = self
            .forum
            .get_post_fields(main_pid)
            .await?
            .as_ref()
            .and_then(IndexDocument::from_post);
        match document {
            Some(document) => {
                self.loader
                    .add(&[Self::attach_title(document, &topic.title)])
                    .await
            }
            None => {
                debug!(tid = topic.tid, pid = main_pid, "Main post has no content");
                Ok(())
            }
        }
    }

    /// Remove every post of a deleted topic.
    ///
    /// Removals run concurrently; each failure is logged and the first one
    /// is returned.
    #[instrument(skip(self))]
    pub async fn on_topic_delete(&self, tid: TopicId) -> Result<(), BridgeError> {
        if !self.settings.is_enabled().await {
            return Ok(());
        }

        let (_, pids) = self.topic_pids(tid, None).await?;
        let results = join_all(pids.iter().map(|pid| self.loader.remove(*pid))).await;

        let mut first_error = None;
        for (pid, result) in pids.iter().zip(results) {
            if let Err(e) = result {
                warn!(tid = tid, pid = *pid, error = %e, "Failed to remove topic post");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                debug!(tid = tid, count = pids.len(), "Removed topic posts");
                Ok(())
            }
        }
    }

    /// Rebuild the index from scratch.
    ///
    /// Runs regardless of the indexing flag. Stops before touching any
    /// document if the old index cannot be deleted.
    #[instrument(skip(self))]
    pub async fn reindex(&self) -> Result<ReindexSummary, BridgeError> {
        info!("Rebuilding search index");
        self.loader.delete_index().await?;
        self.loader.create_index().await?;

        let tids = self.forum.get_all_topic_ids().await?;
        let topics = self.forum.get_topics_fields(&tids).await?;

        let batches = try_join_all(topics.iter().map(|topic| self.topic_documents(topic))).await?;
        let documents: Vec<IndexDocument> = batches.into_iter().flatten().collect();

        self.loader.add(&documents).await?;

        let summary = ReindexSummary {
            topics: topics.len(),
            documents: documents.len(),
        };
        info!(
            topics = summary.topics,
            documents = summary.documents,
            "Search index rebuilt"
        );
        Ok(summary)
    }

    /// Build the documents of every post in `topic`, the main post carrying
    /// the title.
    async fn topic_documents(&self, topic: &TopicFields) -> Result<Vec<IndexDocument>, BridgeError> {
        let (main_pid, pids) = self.topic_pids(topic.tid, topic.main_pid()).await?;
        let posts = self.forum.get_posts_fields(&pids).await?;

        Ok(posts
            .iter()
            .filter_map(IndexDocument::from_post)
            .map(|document| {
                if Some(document.id) == main_pid {
                    Self::attach_title(document, &topic.title)
                } else {
                    document
                }
            })
            .collect())
    }

    /// Resolve the main post and all post ids of a topic.
    ///
    /// The main post is prepended when the host's reply list lacks it. A
    /// `known_main` id takes precedence over the one fetched from the host.
    async fn topic_pids(
        &self,
        tid: TopicId,
        known_main: Option<PostId>,
    ) -> Result<(Option<PostId>, Vec<PostId>), BridgeError> {
        let (fetched_main, mut pids) = tokio::try_join!(
            self.forum.get_topic_main_pid(tid),
            self.forum.get_topic_pids(tid)
        )?;

        let main_pid = known_main.or(fetched_main).filter(|pid| *pid != 0);
        if let Some(main_pid) = main_pid {
            if !pids.contains(&main_pid) {
                pids.insert(0, main_pid);
            }
        }
        Ok((main_pid, pids))
    }

    async fn index_post(&self, post: &PostFields) -> Result<(), BridgeError> {
        match IndexDocument::from_post(post) {
            Some(document) => self.loader.add(&[document]).await,
            None => {
                debug!(pid = post.pid, "Skipping post without id or content");
                Ok(())
            }
        }
    }

    fn attach_title(document: IndexDocument, title: &str) -> IndexDocument {
        if title.is_empty() {
            document
        } else {
            document.with_title(title)
        }
    }
}
