//! Query and pagination controller of the notice board listing page.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod pagination;
pub mod repository;
pub mod services;

#[cfg(feature = "client")]
pub mod console;
#[cfg(feature = "client")]
pub mod models;

#[cfg(feature = "client")]
use tokio::io::{AsyncBufReadExt, BufReader};

#[cfg(feature = "client")]
use crate::console::{
    Command, ConsoleError, HELP, ListRenderer, NoticeDraft, parse_command, read_uploads,
};
#[cfg(feature = "client")]
use crate::domain::notice::Notice;
#[cfg(feature = "client")]
use crate::domain::types::NoticeId;
#[cfg(feature = "client")]
use crate::forms::notice::NoticeForm;
#[cfg(feature = "client")]
use crate::models::config::ClientConfig;
#[cfg(feature = "client")]
use crate::repository::{HttpNoticeRepository, NoticeReader, NoticeWriter};
#[cfg(feature = "client")]
use crate::services::notice as notice_service;
#[cfg(feature = "client")]
use crate::services::{ListEvent, NoticeListService};

/// Fills a create form, or the prefilled edit form of `target`, from the
/// typed draft and submits it.
#[cfg(feature = "client")]
async fn submit_draft(
    repo: &HttpNoticeRepository,
    target: Option<NoticeId>,
    draft: NoticeDraft,
) -> Result<Notice, ConsoleError> {
    let uploads = read_uploads(&draft.files).await?;
    let mut form = match target {
        Some(id) => notice_service::load_edit_form(repo, id).await?,
        None => NoticeForm::default(),
    };
    draft.apply_to(&mut form, uploads);

    let saved = match target {
        Some(id) => notice_service::update_notice(repo, id, form).await?,
        None => notice_service::create_notice(repo, form).await?,
    };
    Ok(saved)
}

/// Runs the console listing page against the configured notice API until
/// stdin closes or `quit` is entered.
#[cfg(feature = "client")]
pub async fn run(config: ClientConfig) -> Result<(), ConsoleError> {
    let repo = HttpNoticeRepository::new(&config)?;
    let service = NoticeListService::new(repo.clone(), config.page_size()?);
    let renderer = ListRenderer::new()?;

    log::info!("Listing notices from {}", config.base_url);
    service.handle(ListEvent::Mounted).await;
    println!("{}", renderer.render_list(&service.state())?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Event(event) => {
                if service.handle(event).await.is_some() {
                    println!("{}", renderer.render_list(&service.state())?);
                }
            }
            Command::Events(events) => {
                let mut fetched = false;
                for event in events {
                    fetched |= service.handle(event).await.is_some();
                }
                if fetched {
                    println!("{}", renderer.render_list(&service.state())?);
                }
            }
            Command::Show(id) => match repo.get_notice(id).await {
                Ok(notice) => println!("{}", renderer.render_notice(&notice)?),
                Err(err) => {
                    log::error!("Failed to load notice {id}: {err}");
                    println!("Unable to load notice {id}.");
                }
            },
            Command::Create(draft) => match submit_draft(&repo, None, draft).await {
                Ok(notice) => {
                    println!("Notice {} created.", notice.id);
                    service.handle(ListEvent::Refresh).await;
                    println!("{}", renderer.render_list(&service.state())?);
                }
                Err(err) => {
                    log::error!("Failed to create notice: {err}");
                    println!("Unable to create notice: {err}");
                }
            },
            Command::Edit(id, draft) => match submit_draft(&repo, Some(id), draft).await {
                Ok(notice) => {
                    println!("{}", renderer.render_notice(&notice)?);
                    service.handle(ListEvent::Refresh).await;
                    println!("{}", renderer.render_list(&service.state())?);
                }
                Err(err) => {
                    log::error!("Failed to update notice {id}: {err}");
                    println!("Unable to update notice {id}: {err}");
                }
            },
            Command::Delete(id) => match repo.delete_notice(id).await {
                Ok(()) => {
                    println!("Notice {id} deleted.");
                    service.handle(ListEvent::Refresh).await;
                    println!("{}", renderer.render_list(&service.state())?);
                }
                Err(err) => {
                    log::error!("Failed to delete notice {id}: {err}");
                    println!("Unable to delete notice {id}.");
                }
            },
        }
    }

    Ok(())
}
