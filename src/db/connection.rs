use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use log::{error, info};
use rusqlite::Connection;
use tokio::sync::oneshot;

use super::migrations::run_migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

type Job = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum Command {
    Run(Job),
    Stop,
}

struct Worker {
    commands: mpsc::Sender<Command>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Worker {
    fn drop(&mut self) {
        let handle = match self.thread.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(handle) = handle else { return };

        if let Err(err) = self.commands.send(Command::Stop) {
            error!("session store thread already gone: {err}");
        }
        if let Err(err) = handle.join() {
            error!("session store thread panicked: {err:?}");
        }
    }
}

/// Handle to the SQLite session store.
///
/// One thread owns the connection; every query is shipped to it as a closure
/// and the result comes back over a oneshot channel, so async callers never
/// block on disk I/O.
#[derive(Clone)]
pub struct Database {
    worker: Arc<Worker>,
}

impl Database {
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let (commands, inbox) = mpsc::channel::<Command>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();
        let thread_path = path.clone();

        let thread = thread::Builder::new()
            .name("tilawa-db".into())
            .spawn(move || match open_connection(&thread_path) {
                Ok(mut conn) => {
                    if ready_tx.send(Ok(())).is_err() {
                        return;
                    }
                    serve(&mut conn, inbox);
                }
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                }
            })
            .context("failed to spawn session store thread")?;

        ready_rx
            .recv()
            .context("session store thread exited during startup")??;

        info!("Session store ready at {}", path.display());

        Ok(Self {
            worker: Arc::new(Worker {
                commands,
                thread: Mutex::new(Some(thread)),
            }),
        })
    }

    /// Run `task` on the store thread and await its result.
    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        let job: Job = Box::new(move |conn| {
            if reply.send(task(conn)).is_err() {
                error!("session store caller went away before the reply");
            }
        });

        self.worker
            .commands
            .send(Command::Run(job))
            .map_err(|err| anyhow!("session store thread is not running: {err}"))?;

        response
            .await
            .map_err(|_| anyhow!("session store thread dropped the request"))?
    }
}

fn open_connection(path: &Path) -> Result<Connection> {
    let mut conn = Connection::open(path)
        .with_context(|| format!("failed to open SQLite database {}", path.display()))?;

    if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
        error!("Failed to enable WAL mode: {err}");
    }
    conn.busy_timeout(BUSY_TIMEOUT)
        .context("failed to set busy timeout")?;

    run_migrations(&mut conn).context("failed to run database migrations")?;
    Ok(conn)
}

fn serve(conn: &mut Connection, inbox: mpsc::Receiver<Command>) {
    while let Ok(command) = inbox.recv() {
        match command {
            Command::Run(job) => job(conn),
            Command::Stop => break,
        }
    }
    info!("Session store thread shutting down");
}
