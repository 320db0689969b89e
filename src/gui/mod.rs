/// ICED GUI Application Module
pub mod styles;

use iced::{
    executor, Alignment, Application, Command, Element, Length, Settings, Subscription, Theme,
    widget::{Button, Column, Container, Row, Scrollable, Space, Text, TextInput},
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::{load_config, save_config, AppConfig};
use crate::explorer::{list_directory, list_volumes, FsEntry, Volume};
use crate::file_picker::pick_file;
use crate::metadata::{to_plain_text, value_text, Extractor, MetadataRecord};
use crate::toast::Toast;

#[derive(Debug, Clone)]
pub enum Message {
    // Path input
    PathChanged(String),
    BrowseFile,

    // Filesystem navigation
    VolumeSelected(usize),
    EntrySelected(usize),
    ParentDirectory,
    RefreshListing,

    // Clipboard
    CopyMetadata,
    ToastTick(Instant),
}

pub struct Metaview {
    // Current file path as typed or selected
    path_input: String,

    // Filesystem browser
    browse_dir: PathBuf,
    entries: Vec<FsEntry>,
    volumes: Vec<Volume>,

    // Extraction
    extractor: Extractor,
    metadata: Vec<MetadataRecord>,

    // Transient UI state
    toast: Option<Toast>,
    status_message: String,

    config: AppConfig,
}

impl Metaview {
    fn set_browse_dir(&mut self, dir: PathBuf) {
        self.browse_dir = dir;
        self.refresh_listing();
        self.config.last_directory = Some(self.browse_dir.clone());
        if let Err(e) = save_config(&self.config) {
            tracing::warn!("failed to save config: {}", e);
        }
    }

    fn refresh_listing(&mut self) {
        match list_directory(&self.browse_dir) {
            Ok(entries) => {
                self.entries = entries;
            }
            Err(e) => {
                self.entries = Vec::new();
                self.status_message = format!("{}", e);
            }
        }
    }

    /// Re-run extraction for the current path. Synchronous: the window
    /// blocks while exiftool runs, matching the one-call-at-a-time model.
    fn update_metadata(&mut self) {
        self.metadata = self.extractor.retrieve(&self.path_input);
        let fields: usize = self.metadata.iter().map(|r| r.len()).sum();
        self.status_message = format!("{} fields", fields);
    }

    fn select_file(&mut self, path: PathBuf) {
        self.path_input = path.to_string_lossy().to_string();
        self.update_metadata();
    }
}

/// Basename shown in the "Selected file:" label.
fn selected_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

impl Application for Metaview {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let config = load_config();
        let browse_dir = config
            .last_directory
            .clone()
            .filter(|dir| dir.is_dir())
            .or_else(|| directories::UserDirs::new().map(|d| d.home_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("/"));

        let mut app = Metaview {
            path_input: String::new(),
            browse_dir,
            entries: Vec::new(),
            volumes: list_volumes(),
            extractor: Extractor::new(),
            metadata: Vec::new(),
            toast: None,
            status_message: "Select a file to view its metadata".to_string(),
            config,
        };
        app.refresh_listing();
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Metaview - Metadata Viewer")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::PathChanged(path) => {
                self.path_input = path;
                self.update_metadata();
            }

            Message::BrowseFile => {
                if let Some(path) = pick_file(Some(&self.browse_dir)) {
                    self.select_file(path);
                }
                // Cancelled dialog changes nothing
            }

            Message::VolumeSelected(index) => {
                if let Some(volume) = self.volumes.get(index) {
                    self.set_browse_dir(volume.path.clone());
                }
            }

            Message::EntrySelected(index) => {
                if let Some(entry) = self.entries.get(index).cloned() {
                    if entry.is_dir {
                        self.set_browse_dir(entry.path);
                    } else {
                        self.select_file(entry.path);
                    }
                }
            }

            Message::ParentDirectory => {
                if let Some(parent) = self.browse_dir.parent().map(Path::to_path_buf) {
                    self.set_browse_dir(parent);
                }
            }

            Message::RefreshListing => {
                self.volumes = list_volumes();
                self.refresh_listing();
            }

            Message::CopyMetadata => {
                let text = to_plain_text(&self.metadata);
                self.toast = Some(Toast::new("Copied"));
                return iced::clipboard::write(text);
            }

            Message::ToastTick(now) => {
                if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
                    self.toast = None;
                }
            }
        }

        Command::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.toast.is_some() {
            iced::time::every(Duration::from_millis(200)).map(Message::ToastTick)
        } else {
            Subscription::none()
        }
    }

    fn view(&self) -> Element<Message> {
        // Path input row
        let input_row = Row::new()
            .spacing(10)
            .align_items(Alignment::Center)
            .push(
                TextInput::new("Type or select a file path...", &self.path_input)
                    .on_input(Message::PathChanged)
                    .padding(8)
                    .width(Length::Fill),
            )
            .push(
                Button::new(Text::new("Select"))
                    .on_press(Message::BrowseFile)
                    .padding(8),
            );

        // Left panel - volume sidebar above the directory listing
        let mut sidebar = Column::new()
            .spacing(5)
            .push(Text::new("Volumes").size(16));

        for (i, volume) in self.volumes.iter().enumerate() {
            sidebar = sidebar.push(
                Button::new(Text::new(&volume.label).size(14))
                    .on_press(Message::VolumeSelected(i))
                    .width(Length::Fill)
                    .padding(5),
            );
        }

        let nav_row = Row::new()
            .spacing(5)
            .push(
                if self.browse_dir.parent().is_some() {
                    Button::new(Text::new("⬆ Up"))
                        .on_press(Message::ParentDirectory)
                        .padding(5)
                } else {
                    Button::new(Text::new("⬆ Up")).padding(5)
                },
            )
            .push(
                Button::new(Text::new("🔄"))
                    .on_press(Message::RefreshListing)
                    .padding(5),
            );

        let mut listing = Column::new().spacing(3);
        for (i, entry) in self.entries.iter().enumerate() {
            let icon = if entry.is_dir { "📁" } else { "📄" };
            listing = listing.push(
                Button::new(Text::new(format!("{} {}", icon, entry.name)).size(14))
                    .on_press(Message::EntrySelected(i))
                    .width(Length::Fill)
                    .padding(3),
            );
        }

        let left_panel = Container::new(
            Column::new()
                .spacing(10)
                .push(sidebar)
                .push(nav_row)
                .push(Text::new(self.browse_dir.display().to_string()).size(12))
                .push(Scrollable::new(listing).height(Length::Fill)),
        )
        .width(Length::Fixed(260.0))
        .height(Length::Fill)
        .padding(10);

        // Right panel - selected file header and the metadata pane
        let header = Row::new()
            .spacing(10)
            .align_items(Alignment::Center)
            .push(Text::new(format!(
                "Selected file: {}",
                selected_file_name(&self.path_input)
            )))
            .push(Space::new(Length::Fill, Length::Shrink))
            .push(
                if self.metadata.is_empty() {
                    Button::new(Text::new("Copy")).padding(8)
                } else {
                    Button::new(Text::new("Copy"))
                        .on_press(Message::CopyMetadata)
                        .padding(8)
                },
            );

        let mut fields = Column::new().spacing(2);
        for (r, record) in self.metadata.iter().enumerate() {
            if r > 0 {
                fields = fields.push(Space::new(Length::Shrink, Length::Fixed(10.0)));
            }
            for (key, value) in record {
                fields = fields.push(
                    Row::new()
                        .push(
                            Text::new(format!("{}: ", key))
                                .size(14)
                                .style(iced::theme::Text::Color(styles::KEY_COLOR)),
                        )
                        .push(
                            Text::new(value_text(value))
                                .size(14)
                                .style(iced::theme::Text::Color(styles::VALUE_COLOR)),
                        ),
                );
            }
        }

        let right_panel = Container::new(
            Column::new()
                .spacing(10)
                .push(header)
                .push(Scrollable::new(fields).height(Length::Fill)),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(10);

        // Status bar, with the toast floated to the right while visible
        let mut status_bar = Row::new()
            .spacing(20)
            .align_items(Alignment::Center)
            .push(Text::new(&self.status_message).size(14))
            .push(Space::new(Length::Fill, Length::Shrink));

        if let Some(ref toast) = self.toast {
            status_bar = status_bar.push(
                Container::new(Text::new(toast.message()).size(14))
                    .style(styles::toast())
                    .padding(10),
            );
        }

        let content = Column::new()
            .spacing(10)
            .padding(10)
            .push(input_row)
            .push(
                Row::new()
                    .push(left_panel)
                    .push(right_panel)
                    .height(Length::Fill),
            )
            .push(status_bar);

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

pub fn run() -> iced::Result {
    Metaview::run(Settings {
        window: iced::window::Settings {
            size: iced::Size::new(800.0, 600.0),
            min_size: Some(iced::Size::new(640.0, 480.0)),
            ..Default::default()
        },
        ..Default::default()
    })
}
