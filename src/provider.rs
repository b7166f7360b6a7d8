use std::sync::mpsc;
use std::thread;

use anyhow::{Error, Result, anyhow};

use crate::bridge::{BridgeResponse, RenderedView, decode_render, rendered_from_body};
use crate::config::{Config, normalize_path};
use crate::page_cache::PageCache;
use crate::page_fetch::{Fetched, FetchedPage, HttpSource, PageSource, interpret};
use crate::state::{Delta, ProviderCommand};

pub const MAX_REDIRECTS: usize = 5;

/// Turns navigation commands into deltas for one page source.
pub struct Provider<S: PageSource> {
    source: S,
    cache: Option<PageCache>,
    current_path: String,
}

impl<S: PageSource> Provider<S> {
    pub fn new(source: S, cache: Option<PageCache>, start_path: &str) -> Self {
        Self {
            source,
            cache,
            current_path: normalize_path(start_path),
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn handle(&mut self, cmd: ProviderCommand) -> Vec<Delta> {
        let mut out = Vec::new();
        match cmd {
            ProviderCommand::Navigate { path } => self.navigate(normalize_path(&path), &mut out),
            ProviderCommand::Reload => {
                let path = self.current_path.clone();
                self.navigate(path, &mut out);
            }
            ProviderCommand::Submit { action, fields } => {
                let action = normalize_path(&action);
                out.push(Delta::Loading {
                    path: action.clone(),
                });
                match self.source.post(&action, &fields) {
                    Ok(page) => self.resolve(action, page, 0, false, &mut out),
                    Err(err) => out.push(Delta::RequestFailed {
                        path: action,
                        reason: format!("{err:#}"),
                    }),
                }
            }
        }
        out
    }

    fn navigate(&mut self, path: String, out: &mut Vec<Delta>) {
        out.push(Delta::Loading { path: path.clone() });
        self.get_and_resolve(path, 0, out);
    }

    fn get_and_resolve(&mut self, path: String, hops: usize, out: &mut Vec<Delta>) {
        match self.source.get(&path) {
            Ok(page) => self.resolve(path, page, hops, true, out),
            Err(err) => self.fall_back(path, err, out),
        }
    }

    fn resolve(
        &mut self,
        path: String,
        page: FetchedPage,
        hops: usize,
        is_get: bool,
        out: &mut Vec<Delta>,
    ) {
        let envelope = match interpret(&page) {
            Ok(Fetched::Envelope(envelope)) => envelope,
            Ok(Fetched::NotFound) => {
                self.current_path = path.clone();
                out.push(Delta::NotFound { path });
                return;
            }
            Ok(Fetched::ServerError(detail)) => {
                self.current_path = path.clone();
                out.push(Delta::ServerError { path, detail });
                return;
            }
            Err(err) if is_get => {
                self.fall_back(path, err, out);
                return;
            }
            Err(err) => {
                out.push(Delta::RequestFailed {
                    path,
                    reason: format!("{err:#}"),
                });
                return;
            }
        };

        match envelope {
            BridgeResponse::Render {
                view,
                props,
                context,
                messages,
                title,
            } => match decode_render(&view, props, context, messages, title) {
                Ok(rendered) => {
                    if is_get && !rendered.view.is_auth_page() {
                        self.snapshot(&path, &page.body, out);
                    }
                    self.current_path = path.clone();
                    out.push(Delta::Render {
                        path,
                        view: Box::new(rendered),
                        from_cache: false,
                    });
                }
                Err(err) => out.push(Delta::RequestFailed {
                    path,
                    reason: format!("{err:#}"),
                }),
            },
            BridgeResponse::Redirect { path: target } => {
                if hops >= MAX_REDIRECTS {
                    out.push(Delta::RequestFailed {
                        path,
                        reason: format!("too many redirects (last: {target})"),
                    });
                    return;
                }
                out.push(Delta::Log(format!("[INFO] Redirect to {target}")));
                self.get_and_resolve(normalize_path(&target), hops + 1, out);
            }
            BridgeResponse::Reload => {
                if hops >= MAX_REDIRECTS {
                    out.push(Delta::RequestFailed {
                        path,
                        reason: "too many reloads".to_string(),
                    });
                    return;
                }
                let current = self.current_path.clone();
                self.get_and_resolve(current, hops + 1, out);
            }
            BridgeResponse::NotFound => {
                self.current_path = path.clone();
                out.push(Delta::NotFound { path });
            }
            BridgeResponse::ServerError => {
                self.current_path = path.clone();
                out.push(Delta::ServerError { path, detail: None });
            }
        }
    }

    fn snapshot(&mut self, path: &str, body: &str, out: &mut Vec<Delta>) {
        let Some(cache) = self.cache.as_mut() else {
            return;
        };
        if let Err(err) = cache.store(path, body) {
            out.push(Delta::Log(format!("[WARN] Offline copy not saved: {err:#}")));
        }
    }

    fn fall_back(&mut self, path: String, err: Error, out: &mut Vec<Delta>) {
        match self.cached_render(&path) {
            Ok(rendered) => {
                out.push(Delta::Log(format!(
                    "[WARN] {path}: {err:#}; showing offline copy"
                )));
                self.current_path = path.clone();
                out.push(Delta::Render {
                    path,
                    view: Box::new(rendered),
                    from_cache: true,
                });
            }
            Err(_) => out.push(Delta::RequestFailed {
                path,
                reason: format!("{err:#}"),
            }),
        }
    }

    fn cached_render(&self, path: &str) -> Result<RenderedView> {
        let cached = self
            .cache
            .as_ref()
            .and_then(|cache| cache.get(path))
            .ok_or_else(|| anyhow!("no offline copy"))?;
        rendered_from_body(&cached.body)
    }
}

pub fn spawn_provider(
    config: Config,
    tx: mpsc::Sender<Delta>,
    cmd_rx: mpsc::Receiver<ProviderCommand>,
) {
    let cache = config.offline_cache.then(PageCache::open_default);
    let start_path = config.start_path.clone();
    let provider = Provider::new(HttpSource::new(config), cache, &start_path);
    spawn_worker(provider, tx, cmd_rx);
}

pub fn spawn_worker<S: PageSource + Send + 'static>(
    mut provider: Provider<S>,
    tx: mpsc::Sender<Delta>,
    cmd_rx: mpsc::Receiver<ProviderCommand>,
) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            for delta in provider.handle(cmd) {
                if tx.send(delta).is_err() {
                    return;
                }
            }
        }
    });
}
