mod assistant;
mod config;
mod conversation;
mod fleet;
mod gateway;
mod ui;

use iced::{
    clipboard,
    event::{self, Event as IcedEvent},
    keyboard::{self, Key},
    time,
    widget::{button, column, container, row, text, text_input, text_input::Id},
    window::{self, Level},
    Element, Font, Length, Subscription, Task, Theme,
};
use std::sync::Arc;
use std::time::Duration;

use assistant::Assistant;
use gateway::{Advice, GatewayClient};

fn main() -> iced::Result {
    let config = config::Config::load();

    iced::application("LuxeDrive Concierge", App::update, App::view)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(window::Settings {
            size: iced::Size::new(config.window.width as f32, config.window.height as f32),
            position: window::Position::Centered,
            ..Default::default()
        })
        .default_font(Font::MONOSPACE)
        .run_with(App::new)
}

#[derive(Debug, Clone)]
enum Message {
    InputChanged(String),
    Submit,
    StarterPicked(&'static str),
    AdviceReceived(Advice),
    GatewayFailed(String),
    OpenSource(String),
    CopyReply(String),
    Tick,
    Exit,
}

struct App {
    assistant: Assistant,
    typing_frame: usize,
    input_id: Id,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let config = config::Config::load();
        let gateway = Arc::new(GatewayClient::from_config(&config.gateway));
        let input_id = Id::unique();

        let app = App {
            assistant: Assistant::new(gateway),
            typing_frame: 0,
            input_id: input_id.clone(),
        };

        let focus_task = text_input::focus(input_id);
        let window_task =
            window::get_latest().and_then(|id| window::change_level(id, Level::AlwaysOnTop));

        (app, Task::batch([focus_task, window_task]))
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(value) => {
                self.assistant.set_input(value);
                Task::none()
            }
            Message::Submit => self.dispatch(),
            Message::StarterPicked(starter) => {
                self.assistant.set_input(starter.to_string());
                self.dispatch()
            }
            Message::AdviceReceived(advice) => {
                self.assistant.resolve(Ok(advice));
                Task::none()
            }
            Message::GatewayFailed(reason) => {
                self.assistant.resolve(Err(anyhow::anyhow!(reason)));
                Task::none()
            }
            Message::OpenSource(uri) => {
                if let Err(e) = open::that(&uri) {
                    eprintln!("Could not open source link: {}", e);
                }
                Task::none()
            }
            Message::CopyReply(reply) => clipboard::write(reply),
            Message::Tick => {
                if self.assistant.is_typing() {
                    self.typing_frame = (self.typing_frame + 1) % ui::SPINNER_FRAMES.len();
                }
                Task::none()
            }
            Message::Exit => iced::exit(),
        }
    }

    /// Hands the pending submission to the runtime. Requests are
    /// fire-and-forget: a new submit while one is outstanding simply adds
    /// another round trip.
    fn dispatch(&mut self) -> Task<Message> {
        match self.assistant.submit() {
            Some(request) => Task::future(async move {
                match request.await {
                    Ok(advice) => Message::AdviceReceived(advice),
                    Err(e) => Message::GatewayFailed(format!("{:#}", e)),
                }
            }),
            None => Task::none(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let timer = if self.assistant.is_typing() {
            time::every(Duration::from_millis(80)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        };

        let events = event::listen_with(|event, _status, _id| {
            if let IcedEvent::Keyboard(keyboard::Event::KeyPressed {
                key: Key::Named(keyboard::key::Named::Escape),
                ..
            }) = event
            {
                Some(Message::Exit)
            } else {
                None
            }
        });

        Subscription::batch([timer, events])
    }

    fn view(&self) -> Element<Message> {
        let header = column![
            text("LUXEDRIVE CONCIERGE").size(15),
            text("Active & Enhanced").size(10),
        ]
        .spacing(2);

        let transcript = ui::transcript(
            self.assistant.transcript(),
            self.assistant.is_typing(),
            self.typing_frame,
        );

        let input = text_input("Ask Luxe Concierge…", self.assistant.input())
            .on_input(Message::InputChanged)
            .on_submit(Message::Submit)
            .padding(12)
            .size(14)
            .id(self.input_id.clone());

        let send = button(text("Send").size(14))
            .on_press(Message::Submit)
            .padding(12);

        let mut content = column![header, transcript].spacing(10).padding(10);

        if self.assistant.awaiting_first_question() {
            content = content.push(ui::starters());
        }

        content = content.push(row![input, send].spacing(8));

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}
