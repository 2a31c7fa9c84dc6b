use iced::{
    Element, Length, Task, Color, Alignment, Border,
};
use iced::widget::{
    Column, Row, Container, Text, Button, TextInput, TextEditor, Scrollable, Space, rule,
    text_editor,
};

use crate::error::ValidationError;
use crate::filter::filter;
use crate::models::*;
use crate::storage::Store;
use crate::submission::{self, RawSubmission};
use chrono::{DateTime, Local};
use log::{error, info};
use rfd::FileDialog;
use std::path::PathBuf;
use tokio::task;

const TAGLINES: [&str; 3] = [
    "Your local farmers market, in your pocket",
    "Connecting regenerative communities worldwide",
    "Sharing skills and abundance together",
];

const WELCOME: &str = "Welcome to the Digital Community Vault. This platform enables regenerative, \
land-based communities to share resources, skills, goods and services across a decentralized \
network. Use the directory to discover hubs around the world or submit your community to get involved.";

const ABOUT: &str = "The Digital Community Vault is a grassroots project inspired by the vision of a \
decentralized network of healing hubs. Like a mycelial web, we aim to connect communities that share \
ecological and spiritual values. Future iterations may include tokenized exchange, member profiles, \
and integrated DAO governance.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Directory,
    Submit,
    About,
}

impl Page {
    fn all() -> [Page; 4] {
        [Page::Home, Page::Directory, Page::Submit, Page::About]
    }

    fn label(&self) -> &'static str {
        match self {
            Page::Home => "🏠 Home",
            Page::Directory => "📖 Directory",
            Page::Submit => "➕ Submit",
            Page::About => "🌍 About",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStatus {
    Idle,
    Saving,
    Added(String),
    Invalid(ValidationError),
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Page),
    QueryChanged(String),
    NameChanged(String),
    LocationChanged(String),
    DescriptionEdited(text_editor::Action),
    OffersEdited(text_editor::Action),
    NeedsEdited(text_editor::Action),
    Submit,
    /// Vault file the save went to, and the committed list on success.
    SubmitComplete(PathBuf, Result<(CommunityRecord, Vec<CommunityRecord>), String>),
    ChooseVault,
    VaultChosen(Option<PathBuf>),
    Reload,
    ToggleTheme,
}

pub struct CommunityVaultApp {
    store: Store,
    communities: Vec<CommunityRecord>,
    notice: Option<String>,
    last_saved: Option<DateTime<Local>>,

    // UI state
    page: Page,
    tagline_index: usize,
    query: String,
    name: String,
    location: String,
    description: text_editor::Content,
    offers: text_editor::Content,
    needs: text_editor::Content,
    submit_status: SubmitStatus,
    theme: Theme,
}

impl CommunityVaultApp {
    pub fn new(store: Store) -> (Self, Task<Message>) {
        let (communities, status) = store.load_with_status();
        (
            CommunityVaultApp {
                store,
                communities,
                notice: notice_for(&status),
                last_saved: None,
                page: Page::Home,
                tagline_index: 0,
                query: String::new(),
                name: String::new(),
                location: String::new(),
                description: text_editor::Content::new(),
                offers: text_editor::Content::new(),
                needs: text_editor::Content::new(),
                submit_status: SubmitStatus::Idle,
                theme: Theme::Light,
            },
            Task::none(),
        )
    }

    pub fn communities(&self) -> &[CommunityRecord] {
        &self.communities
    }

    pub fn submit_status(&self) -> &SubmitStatus {
        &self.submit_status
    }

    pub fn tagline(&self) -> &'static str {
        TAGLINES[self.tagline_index % TAGLINES.len()]
    }

    fn draft(&self) -> RawSubmission {
        RawSubmission {
            name: self.name.clone(),
            location: self.location.clone(),
            description: self.description.text(),
            offers: self.offers.text(),
            needs: self.needs.text(),
        }
    }

    fn clear_form(&mut self) {
        self.name.clear();
        self.location.clear();
        self.description = text_editor::Content::new();
        self.offers = text_editor::Content::new();
        self.needs = text_editor::Content::new();
    }

    fn is_saving(&self) -> bool {
        self.submit_status == SubmitStatus::Saving
    }

    fn reload(&mut self) {
        let (communities, status) = self.store.load_with_status();
        self.communities = communities;
        self.notice = notice_for(&status);
        self.last_saved = None;
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(page) => {
                if page == Page::Home && self.page != Page::Home {
                    self.tagline_index = (self.tagline_index + 1) % TAGLINES.len();
                }
                self.page = page;
            }
            Message::QueryChanged(q) => {
                self.query = q;
            }
            Message::NameChanged(s) => {
                self.name = s;
            }
            Message::LocationChanged(s) => {
                self.location = s;
            }
            Message::DescriptionEdited(action) => {
                self.description.perform(action);
            }
            Message::OffersEdited(action) => {
                self.offers.perform(action);
            }
            Message::NeedsEdited(action) => {
                self.needs.perform(action);
            }
            Message::Submit => {
                if self.is_saving() {
                    return Task::none();
                }
                let draft = self.draft();
                if let Err(e) = draft.validate() {
                    self.submit_status = SubmitStatus::Invalid(e);
                    return Task::none();
                }
                self.submit_status = SubmitStatus::Saving;
                let store = self.store.clone();
                let mut snapshot = self.communities.clone();
                return Task::perform(async move {
                    let path = store.path().to_path_buf();
                    let res = task::spawn_blocking(move || {
                        submission::submit(&store, &mut snapshot, &draft)
                            .map(|rec| (rec, snapshot))
                            .map_err(|e| e.to_string())
                    })
                    .await
                    .map_err(|e| format!("save task failed: {}", e))
                    .and_then(|res| res);
                    (path, res)
                }, |(path, res)| Message::SubmitComplete(path, res));
            }
            Message::SubmitComplete(path, _) if path != self.store.path() => {
                // the list belongs to a vault that is no longer open
                info!("discarding save result for {}", path.display());
                self.submit_status = SubmitStatus::Idle;
            }
            Message::SubmitComplete(_, Ok((rec, communities))) => {
                self.communities = communities;
                self.last_saved = Some(Local::now());
                self.submit_status = SubmitStatus::Added(rec.name);
                self.clear_form();
            }
            Message::SubmitComplete(_, Err(e)) => {
                error!("submission failed: {}", e);
                self.submit_status = SubmitStatus::Failed(e);
            }
            Message::ChooseVault | Message::VaultChosen(_) | Message::Reload if self.is_saving() => {
                info!("save in progress, not switching or reloading the vault");
            }
            Message::ChooseVault => {
                return Task::perform(async {
                    FileDialog::new().set_directory(".").add_filter("json", &["json"]).pick_file()
                }, Message::VaultChosen);
            }
            Message::VaultChosen(Some(path)) => {
                info!("switching vault file to {}", path.display());
                self.store = self.store.with_path(path);
                self.reload();
                self.submit_status = SubmitStatus::Idle;
            }
            Message::VaultChosen(None) => { /* cancelled */ }
            Message::Reload => {
                self.reload();
            }
            Message::ToggleTheme => {
                self.theme = match self.theme {
                    Theme::Light => Theme::Dark,
                    Theme::Dark => Theme::Light,
                };
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let sidebar = self.view_sidebar();

        let page = match self.page {
            Page::Home => self.view_home(),
            Page::Directory => self.view_directory(),
            Page::Submit => self.view_submit(),
            Page::About => self.view_about(),
        };

        let mut main_content = Column::new().width(Length::Fill);
        if let Some(notice) = &self.notice {
            main_content = main_content.push(self.view_notice(notice));
        }
        main_content = main_content.push(page);

        let layout = Row::new()
            .push(sidebar)
            .push(rule::Rule::vertical(1))
            .push(main_content);

        let bg_color = self.bg_color();
        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| {
                iced::widget::container::Style {
                    background: Some(iced::Background::Color(bg_color)),
                    border: Border::default(),
                    ..Default::default()
                }
            })
            .into()
    }

    fn view_sidebar(&self) -> Element<'_, Message> {
        let accent = self.accent_color();
        let secondary_text = self.secondary_text_color();
        let tertiary_text = self.tertiary_text_color();

        let title = Text::new("Community Vault")
            .size(26)
            .style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(accent),
                }
            });

        let subtitle = Text::new("Regenerative community directory")
            .size(14)
            .style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(secondary_text),
                }
            });

        let mut nav = Column::new().spacing(8);
        for page in Page::all() {
            let btn = Button::new(Text::new(page.label()).size(15))
                .padding(10)
                .width(Length::Fill);
            // the current page is shown as a disabled button
            nav = nav.push(if page == self.page { btn } else { btn.on_press(Message::Navigate(page)) });
        }

        let count = Text::new(format!("{} communities", self.communities.len()))
            .size(13)
            .style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(secondary_text),
                }
            });

        let saved = Text::new(match &self.last_saved {
            Some(t) => format!("Last saved {}", t.format("%H:%M")),
            None => "No changes saved this session".to_string(),
        })
        .size(12)
        .style(move |_theme| {
            iced::widget::text::Style {
                color: Some(tertiary_text),
            }
        });

        let vault_path = Text::new(self.store.path().display().to_string())
            .size(11)
            .style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(tertiary_text),
                }
            });

        let saving = self.is_saving();
        let open_btn = Button::new(Text::new("📁 Open Vault File").size(14))
            .on_press_maybe((!saving).then_some(Message::ChooseVault))
            .padding(10)
            .width(Length::Fill);

        let reload_btn = Button::new(Text::new("⟳ Reload").size(14))
            .on_press_maybe((!saving).then_some(Message::Reload))
            .padding(10)
            .width(Length::Fill);

        let theme_btn = Button::new(
            Text::new(match self.theme {
                Theme::Light => "🌙 Dark Mode",
                Theme::Dark => "☀️ Light Mode",
            })
                .size(14)
        )
        .on_press(Message::ToggleTheme)
        .padding(10)
        .width(Length::Fill);

        let sidebar_content = Column::new()
            .padding(20)
            .spacing(16)
            .width(Length::Fixed(260.0))
            .push(title)
            .push(subtitle)
            .push(rule::Rule::horizontal(1))
            .push(nav)
            .push(rule::Rule::horizontal(1))
            .push(count)
            .push(saved)
            .push(vault_path)
            .push(open_btn)
            .push(reload_btn)
            .push(Space::with_height(10))
            .push(theme_btn);

        let sidebar_bg = self.sidebar_bg_color();
        Container::new(sidebar_content)
            .height(Length::Fill)
            .style(move |_theme| {
                iced::widget::container::Style {
                    background: Some(iced::Background::Color(sidebar_bg)),
                    border: Border::default(),
                    ..Default::default()
                }
            })
            .into()
    }

    fn view_notice<'a>(&self, notice: &'a str) -> Element<'a, Message> {
        Container::new(Text::new(notice).size(14).style(|_theme| {
            iced::widget::text::Style {
                color: Some(Color::from_rgb(0.55, 0.35, 0.0)),
            }
        }))
        .padding(12)
        .width(Length::Fill)
        .style(|_theme| {
            iced::widget::container::Style {
                background: Some(iced::Background::Color(Color::from_rgb(1.0, 0.95, 0.8))),
                border: Border::default(),
                ..Default::default()
            }
        })
        .into()
    }

    fn view_home(&self) -> Element<'_, Message> {
        let text_color = self.text_color();
        let secondary_text = self.secondary_text_color();
        let accent = self.accent_color();

        let title = Text::new("Digital Community Vault")
            .size(36)
            .style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(text_color),
                }
            });

        let tagline = Text::new(self.tagline())
            .size(20)
            .style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(accent),
                }
            });

        let welcome = Text::new(WELCOME)
            .size(16)
            .style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(secondary_text),
                }
            });

        let browse_btn = Button::new(Text::new("Browse the Directory →").size(16))
            .on_press(Message::Navigate(Page::Directory))
            .padding(15);

        let content = Column::new()
            .padding(40)
            .spacing(25)
            .width(Length::Fill)
            .push(title)
            .push(tagline)
            .push(welcome)
            .push(Space::with_height(20))
            .push(browse_btn);

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_directory(&self) -> Element<'_, Message> {
        let text_color = self.text_color();
        let tertiary_text = self.tertiary_text_color();

        let title = Text::new("Community Directory")
            .size(32)
            .style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(text_color),
                }
            });

        let search = TextInput::new("Search by name or location", &self.query)
            .on_input(Message::QueryChanged)
            .padding(12)
            .size(16)
            .width(Length::Fill);

        let results = filter(&self.communities, &self.query);

        let mut cards = Column::new().spacing(16).width(Length::Fill);
        if results.is_empty() {
            cards = cards.push(
                Text::new("No communities match your search")
                    .size(16)
                    .style(move |_theme| {
                        iced::widget::text::Style {
                            color: Some(tertiary_text),
                        }
                    })
            );
        }
        for rec in results {
            cards = cards.push(self.view_card(rec));
        }

        let content = Column::new()
            .padding(40)
            .spacing(20)
            .width(Length::Fill)
            .push(title)
            .push(search)
            .push(Scrollable::new(cards).height(Length::Fill));

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_card<'a>(&self, rec: &'a CommunityRecord) -> Element<'a, Message> {
        let text_color = self.text_color();
        let secondary_text = self.secondary_text_color();
        let location_color = self.location_color();
        let container_bg = self.container_bg_color();
        let border_color = self.border_color();

        let bullets = move |items: &'a [String]| {
            items.iter().fold(Column::new().spacing(4).padding([0, 16]), |col, item| {
                col.push(Text::new(format!("• {}", item)).size(14).style(move |_theme| {
                    iced::widget::text::Style {
                        color: Some(text_color),
                    }
                }))
            })
        };
        let heading = move |label: &'static str| {
            Text::new(label).size(16).style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(text_color),
                }
            })
        };

        let card = Column::new()
            .spacing(8)
            .push(Text::new(&rec.name).size(22).style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(text_color),
                }
            }))
            .push(Text::new(&rec.location).size(15).style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(location_color),
                }
            }))
            .push(Text::new(&rec.description).size(14).style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(secondary_text),
                }
            }))
            .push(heading("🌿 What We Offer"))
            .push(bullets(&rec.offers))
            .push(heading("🙌 What We Seek"))
            .push(bullets(&rec.needs));

        Container::new(card)
            .padding(16)
            .width(Length::Fill)
            .style(move |_theme| {
                iced::widget::container::Style {
                    background: Some(iced::Background::Color(container_bg)),
                    border: Border {
                        color: border_color,
                        width: 1.0,
                        radius: 8.0.into(),
                    },
                    ..Default::default()
                }
            })
            .into()
    }

    fn view_submit(&self) -> Element<'_, Message> {
        let text_color = self.text_color();
        let secondary_text = self.secondary_text_color();

        let title = Text::new("Submit a New Community")
            .size(32)
            .style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(text_color),
                }
            });

        let field_label = move |label: &'static str| {
            Text::new(label).size(14).style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(secondary_text),
                }
            })
        };

        let name_input = TextInput::new("Community name", &self.name)
            .on_input(Message::NameChanged)
            .padding(12)
            .size(16);

        let location_input = TextInput::new("Region, Country", &self.location)
            .on_input(Message::LocationChanged)
            .padding(12)
            .size(16);

        let description_input = TextEditor::new(&self.description)
            .placeholder("What is your community about?")
            .on_action(Message::DescriptionEdited)
            .height(90.0);

        let offers_input = TextEditor::new(&self.offers)
            .placeholder("One offer per line")
            .on_action(Message::OffersEdited)
            .height(90.0);

        let needs_input = TextEditor::new(&self.needs)
            .placeholder("One need per line")
            .on_action(Message::NeedsEdited)
            .height(90.0);

        let saving = self.is_saving();
        let submit_btn = Button::new(
            Text::new(if saving { "Saving..." } else { "Add Community" })
                .size(16)
        )
        .padding(15)
        .width(Length::Fixed(200.0));
        let submit_btn = if saving { submit_btn } else { submit_btn.on_press(Message::Submit) };

        let form = Column::new()
            .spacing(8)
            .width(Length::Fill)
            .push(field_label("Name"))
            .push(name_input)
            .push(field_label("Location"))
            .push(location_input)
            .push(field_label("Description"))
            .push(description_input)
            .push(field_label("Offers (one per line)"))
            .push(offers_input)
            .push(field_label("Needs (one per line)"))
            .push(needs_input);

        let mut content = Column::new()
            .padding(40)
            .spacing(20)
            .width(Length::Fill)
            .push(title)
            .push(form)
            .push(submit_btn);

        if let Some((msg, color)) = self.submit_feedback() {
            content = content.push(Text::new(msg).size(15).style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(color),
                }
            }));
        }

        Container::new(Scrollable::new(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn submit_feedback(&self) -> Option<(String, Color)> {
        match &self.submit_status {
            SubmitStatus::Idle | SubmitStatus::Saving => None,
            SubmitStatus::Added(name) => Some((
                format!("✓ {} was added to the directory!", name),
                Color::from_rgb(0.2, 0.7, 0.2),
            )),
            SubmitStatus::Invalid(e) => Some((format!("⚠ {}", e), Color::from_rgb(0.85, 0.5, 0.1))),
            SubmitStatus::Failed(e) => Some((format!("✗ {}", e), Color::from_rgb(0.9, 0.2, 0.2))),
        }
    }

    fn view_about(&self) -> Element<'_, Message> {
        let text_color = self.text_color();
        let secondary_text = self.secondary_text_color();

        let title = Text::new("About the Digital Community Vault")
            .size(32)
            .style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(text_color),
                }
            });

        let body = Text::new(ABOUT)
            .size(16)
            .style(move |_theme| {
                iced::widget::text::Style {
                    color: Some(secondary_text),
                }
            });

        let content = Column::new()
            .padding(40)
            .spacing(25)
            .width(Length::Fill)
            .align_x(Alignment::Start)
            .push(title)
            .push(body);

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    // Theme color helpers
    fn bg_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(1.0, 1.0, 1.0),
            Theme::Dark => Color::from_rgb(0.11, 0.11, 0.13),
        }
    }

    fn sidebar_bg_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(0.95, 0.97, 0.95),
            Theme::Dark => Color::from_rgb(0.15, 0.16, 0.15),
        }
    }

    fn text_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(0.1, 0.1, 0.1),
            Theme::Dark => Color::from_rgb(0.9, 0.9, 0.9),
        }
    }

    fn secondary_text_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(0.4, 0.4, 0.4),
            Theme::Dark => Color::from_rgb(0.6, 0.6, 0.6),
        }
    }

    fn tertiary_text_color(&self) -> Color {
        Color::from_rgb(0.5, 0.5, 0.5)
    }

    fn container_bg_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(1.0, 1.0, 1.0),
            Theme::Dark => Color::from_rgb(0.2, 0.2, 0.22),
        }
    }

    fn border_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::from_rgb(0.85, 0.85, 0.85),
            Theme::Dark => Color::from_rgb(0.3, 0.3, 0.32),
        }
    }

    fn location_color(&self) -> Color {
        Color::from_rgb(0.12, 0.54, 0.44)
    }

    fn accent_color(&self) -> Color {
        Color::from_rgb(0.2, 0.55, 0.35)
    }
}

fn notice_for(status: &LoadStatus) -> Option<String> {
    match status {
        LoadStatus::Recovered(reason) => Some(format!(
            "Could not read the vault file ({}). Showing sample communities; the next submission will overwrite it.",
            reason
        )),
        LoadStatus::Loaded | LoadStatus::Missing => None,
    }
}
