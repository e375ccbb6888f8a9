// src/controller.rs

use crate::config::Config;
use crate::constants::PLACEHOLDER_ID_PREFIX;
use crate::conversation::ConversationStore;
use crate::errors::ParrotResult;
use crate::history::InputHistory;
use crate::models::{generate_message_id, Message, Notice};
use crate::reply::{generate_reply, ReplyTiming, THINKING_STAGES};
use crate::speech::{SpeechEvent, SpeechEventReceiver, SpeechRecognizer, SpeechSettings};
use crate::storage::KeyValueStore;
use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Result of asking the controller to submit some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Accepted; carries the id of the new user message.
    Accepted(String),
    Empty,
    /// A reply is still being staged.
    Busy,
}

#[derive(Debug, Default)]
struct Dictation {
    recording: bool,
    final_transcript: String,
}

/// Conversation state for the logged-in user.
pub struct ChatState {
    email: String,
    input: String,
    messages: Vec<Message>,
    history: InputHistory,
    reply_pending: bool,
    dictation: Dictation,
    notices: Vec<Notice>,
    recognizer: Box<dyn SpeechRecognizer>,
    speech_settings: SpeechSettings,
    conversations: ConversationStore,
}

impl ChatState {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn history(&self) -> &InputHistory {
        &self.history
    }

    /// Drives the typing indicator.
    pub fn is_reply_pending(&self) -> bool {
        self.reply_pending
    }

    pub fn is_recording(&self) -> bool {
        self.dictation.recording
    }

    pub fn speech_supported(&self) -> bool {
        self.recognizer.is_supported()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn recall_previous(&mut self) {
        if let Some(entry) = self.history.recall_previous() {
            self.input = entry.to_string();
        }
    }

    pub fn recall_next(&mut self) {
        if let Some(entry) = self.history.recall_next() {
            self.input = entry.to_string();
        }
    }

    fn persist(&self) {
        if let Err(e) = self
            .conversations
            .save(&self.email, &self.messages, self.history.entries())
        {
            warn!("Failed to persist conversation for {}: {}", self.email, e);
        }
    }

    fn begin_submission(&mut self, text: &str) -> Submission {
        if text.trim().is_empty() {
            return Submission::Empty;
        }
        if self.reply_pending {
            debug!("Submission rejected while a reply is pending");
            return Submission::Busy;
        }

        let id = generate_message_id();
        self.messages.push(Message::user(text, id.as_str()));
        self.reply_pending = true;
        self.history.push(text);
        self.input.clear();
        self.messages
            .push(Message::placeholder(THINKING_STAGES[0], &id));
        self.persist();

        info!("Accepted submission {} ({} chars)", id, text.len());
        Submission::Accepted(id)
    }

    fn placeholder_mut(&mut self, id: &str) -> Option<&mut Message> {
        let placeholder_id = format!("{}{}", PLACEHOLDER_ID_PREFIX, id);
        self.messages
            .iter_mut()
            .rev()
            .find(|msg| msg.id == placeholder_id)
    }

    fn show_stage(&mut self, id: &str, stage: &str) {
        match self.placeholder_mut(id) {
            Some(placeholder) => placeholder.text = stage.to_string(),
            None => warn!("Placeholder for {} disappeared before stage update", id),
        }
        self.persist();
        debug!("Submission {} stage: {}", id, stage);
    }

    fn finish_reply(&mut self, id: &str, reply: String) {
        let reply = Message::reply(reply, id);
        match self.placeholder_mut(id) {
            Some(placeholder) => *placeholder = reply,
            None => self.messages.push(reply),
        }
        self.reply_pending = false;
        self.persist();
        info!("Reply delivered for {}", id);
    }

    /// Returns false when dictation could not start.
    fn start_dictation(&mut self) -> bool {
        if !self.recognizer.is_supported() {
            self.notices.push(Notice::SpeechUnsupported);
            return false;
        }
        if self.reply_pending || self.dictation.recording {
            return false;
        }

        self.input.clear();
        self.dictation.final_transcript.clear();
        if let Err(e) = self.recognizer.start(&self.speech_settings) {
            error!("Speech recognizer failed to start: {}", e);
            self.notices.push(Notice::NoSpeech);
            return false;
        }
        self.dictation.recording = true;
        info!("Dictation started");
        true
    }

    /// Stops capture and hands back the transcript to submit, if any.
    fn stop_dictation(&mut self) -> Option<String> {
        if !self.recognizer.is_supported() {
            self.notices.push(Notice::SpeechUnsupported);
            return None;
        }
        if !self.dictation.recording {
            return None;
        }

        self.recognizer.stop();
        self.finish_dictation()
    }

    fn finish_dictation(&mut self) -> Option<String> {
        self.dictation.recording = false;
        let transcript = std::mem::take(&mut self.dictation.final_transcript);
        info!("Dictation stopped");
        (!transcript.trim().is_empty()).then_some(transcript)
    }

    fn apply_speech_event(&mut self, event: SpeechEvent) -> Option<String> {
        match event {
            SpeechEvent::Interim(text) => {
                if self.dictation.recording {
                    self.input = text;
                }
                None
            }
            SpeechEvent::Final(text) => {
                if self.dictation.recording {
                    if !text.is_empty() {
                        self.dictation.final_transcript = text.clone();
                    }
                    self.input = text;
                }
                None
            }
            SpeechEvent::Error(kind) if kind.stops_dictation() => {
                error!("Speech recognition error: {:?}", kind);
                self.notices.push(Notice::NoSpeech);
                if !self.dictation.recording {
                    return None;
                }
                self.recognizer.stop();
                self.finish_dictation()
            }
            SpeechEvent::Error(kind) => {
                error!("Speech recognition error: {:?}", kind);
                None
            }
            SpeechEvent::Ended => {
                if self.dictation.recording {
                    debug!("Recognizer ended while recording, restarting");
                    if let Err(e) = self.recognizer.start(&self.speech_settings) {
                        error!("Speech recognizer failed to restart: {}", e);
                        self.notices.push(Notice::NoSpeech);
                        return self.finish_dictation();
                    }
                }
                None
            }
        }
    }
}

/// Handles for the tasks a controller spawns. Dropping the last reference
/// aborts them.
#[derive(Default)]
struct TaskSlots {
    reply: StdMutex<Option<JoinHandle<()>>>,
    listener: StdMutex<Option<JoinHandle<()>>>,
}

impl TaskSlots {
    fn abort_all(&self) {
        for slot in [&self.reply, &self.listener] {
            if let Ok(mut slot) = slot.lock() {
                if let Some(handle) = slot.take() {
                    handle.abort();
                }
            }
        }
    }
}

impl Drop for TaskSlots {
    fn drop(&mut self) {
        self.abort_all();
    }
}

/// Owns the conversation state and the background reply task.
#[derive(Clone)]
pub struct ChatController {
    state: Arc<Mutex<ChatState>>,
    timing: ReplyTiming,
    tasks: Arc<TaskSlots>,
}

impl ChatController {
    /// Opens the stored conversation for `email`.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        email: &str,
        recognizer: Box<dyn SpeechRecognizer>,
        config: &Config,
    ) -> ParrotResult<Self> {
        let conversations = ConversationStore::new(store);
        let conversation = conversations.load(email)?;
        info!(
            "Opened conversation for {} ({} messages, {} history entries)",
            email,
            conversation.messages.len(),
            conversation.history.len()
        );

        let state = ChatState {
            email: email.to_string(),
            input: String::new(),
            messages: conversation.messages,
            history: InputHistory::new(conversation.history),
            reply_pending: false,
            dictation: Dictation::default(),
            notices: Vec::new(),
            recognizer,
            speech_settings: config.speech_settings(),
            conversations,
        };

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            timing: config.reply_timing(),
            tasks: Arc::new(TaskSlots::default()),
        })
    }

    pub fn state(&self) -> Arc<Mutex<ChatState>> {
        self.state.clone()
    }

    pub async fn submit(&self, text: &str) -> Submission {
        let submission = self.state.lock().await.begin_submission(text);
        if let Submission::Accepted(id) = &submission {
            self.spawn_reply(id.clone(), text.to_string());
        }
        submission
    }

    /// Submits whatever is in the input field.
    pub async fn send_input(&self) -> Submission {
        let text = self.state.lock().await.input.clone();
        self.submit(&text).await
    }

    pub async fn recall_previous(&self) {
        self.state.lock().await.recall_previous();
    }

    pub async fn recall_next(&self) {
        self.state.lock().await.recall_next();
    }

    pub async fn start_dictation(&self) -> bool {
        self.state.lock().await.start_dictation()
    }

    /// Stops dictation and submits the final transcript, if there is one.
    pub async fn stop_dictation(&self) -> Option<Submission> {
        let transcript = self.state.lock().await.stop_dictation()?;
        Some(self.submit(&transcript).await)
    }

    pub async fn toggle_dictation(&self) {
        let recording = self.state.lock().await.is_recording();
        if recording {
            self.stop_dictation().await;
        } else {
            self.start_dictation().await;
        }
    }

    pub async fn handle_speech_event(&self, event: SpeechEvent) -> Option<Submission> {
        let transcript = self.state.lock().await.apply_speech_event(event)?;
        Some(self.submit(&transcript).await)
    }

    /// Applies recognizer events as they arrive until the sender side closes
    /// or the controller is dropped.
    pub fn listen(&self, mut events: SpeechEventReceiver) {
        let state = self.state.clone();
        let timing = self.timing;
        let tasks = Arc::downgrade(&self.tasks);
        let handle = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let Some(tasks) = tasks.upgrade() else {
                    break;
                };
                let controller = ChatController {
                    state: state.clone(),
                    timing,
                    tasks,
                };
                controller.handle_speech_event(event).await;
            }
            debug!("Speech event stream closed");
        });
        store_handle(&self.tasks.listener, handle);
    }

    /// Aborts the in-flight reply and the speech listener.
    pub fn shutdown(&self) {
        self.tasks.abort_all();
    }

    fn spawn_reply(&self, id: String, submitted: String) {
        let handle = tokio::spawn(run_staged_reply(
            self.state.clone(),
            self.timing,
            id,
            submitted,
        ));
        store_handle(&self.tasks.reply, handle);
    }
}

fn store_handle(slot: &StdMutex<Option<JoinHandle<()>>>, handle: JoinHandle<()>) {
    match slot.lock() {
        Ok(mut slot) => *slot = Some(handle),
        Err(_) => warn!("Task slot poisoned; task will not be cancellable"),
    }
}

/// Walks the placeholder through the thinking stages, then swaps in the reply.
async fn run_staged_reply(
    state: Arc<Mutex<ChatState>>,
    timing: ReplyTiming,
    id: String,
    submitted: String,
) {
    for stage in THINKING_STAGES.iter().skip(1) {
        sleep(timing.stage_delay).await;
        state.lock().await.show_stage(&id, stage);
    }

    sleep(timing.reply_delay).await;
    let reply = generate_reply(&submitted);
    state.lock().await.finish_reply(&id, reply);
}
