//! Application shell state
//!
//! [`AppShell`] is the single owner of the form values, the uploaded image and
//! the theme. Widgets read from it and describe changes; the shell applies them.

use crossterm::event::KeyEvent;

use crate::config::Config;
use crate::form::{FieldChange, FormState};
use crate::render_engines::mockup::{render_mockup, Mockup, MockupInput, PreviewImage};
use crate::shortcuts::{ShortcutAction, ShortcutRegistry, Subscription, THEME_CYCLE_COMBO};
use crate::sink::SubmissionSink;
use crate::terminal_capabilities::TerminalCapabilities;
use crate::theme::Theme;
use crate::upload::{ImageRef, ResourceRegistry, SelectedFile, UploadedImage};

/// Which form control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedWidget {
    #[default]
    Height,
    Weight,
    Build,
    CustomText,
    Upload,
    Submit,
}

impl FocusedWidget {
    pub fn next(&self) -> Self {
        match self {
            FocusedWidget::Height => FocusedWidget::Weight,
            FocusedWidget::Weight => FocusedWidget::Build,
            FocusedWidget::Build => FocusedWidget::CustomText,
            FocusedWidget::CustomText => FocusedWidget::Upload,
            FocusedWidget::Upload => FocusedWidget::Submit,
            FocusedWidget::Submit => FocusedWidget::Height,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FocusedWidget::Height => FocusedWidget::Submit,
            FocusedWidget::Weight => FocusedWidget::Height,
            FocusedWidget::Build => FocusedWidget::Weight,
            FocusedWidget::CustomText => FocusedWidget::Build,
            FocusedWidget::Upload => FocusedWidget::CustomText,
            FocusedWidget::Submit => FocusedWidget::Upload,
        }
    }
}

/// Composition root: owns all state and the theme shortcut subscription
pub struct AppShell {
    // Navigation
    pub focus: FocusedWidget,
    pub show_help: bool,
    pub should_quit: bool,

    // Owned state
    form: FormState,
    theme: Theme,
    uploaded_image: Option<UploadedImage>,

    // Resources and subscriptions
    resources: ResourceRegistry,
    shortcuts: ShortcutRegistry,
    theme_subscription: Option<Subscription>,

    sink: Box<dyn SubmissionSink>,

    // Upload prompt (file picker)
    pub upload_prompt_active: bool,
    pub upload_prompt_input: String,

    /// Message shown in a modal after submit
    pub acknowledgement: Option<String>,

    pub status_message: String,
    pub status_is_error: bool,

    // Terminal info
    pub terminal_size: (u16, u16),
    pub capabilities: TerminalCapabilities,

    pub config: Config,
}

impl AppShell {
    pub fn new(
        config: Config,
        capabilities: TerminalCapabilities,
        sink: Box<dyn SubmissionSink>,
    ) -> Self {
        let terminal_size = capabilities.size;

        Self {
            focus: FocusedWidget::default(),
            show_help: false,
            should_quit: false,

            form: FormState::new(),
            theme: Theme::default(),
            uploaded_image: None,

            resources: ResourceRegistry::new(),
            shortcuts: ShortcutRegistry::new(),
            theme_subscription: None,

            sink,

            upload_prompt_active: false,
            upload_prompt_input: String::new(),
            acknowledgement: None,

            status_message: "Ready - Press [F1] for help".to_string(),
            status_is_error: false,

            terminal_size,
            capabilities,

            config,
        }
    }

    /// Install the theme shortcut. Calling it twice keeps a single listener.
    pub fn mount(&mut self) {
        if self.theme_subscription.is_none() {
            self.theme_subscription = Some(
                self.shortcuts
                    .subscribe(THEME_CYCLE_COMBO, ShortcutAction::CycleTheme),
            );
            tracing::info!("shell mounted");
        }
    }

    /// Remove the theme shortcut and release the uploaded image.
    pub fn teardown(&mut self) {
        self.theme_subscription = None;
        self.uploaded_image = None;
        tracing::info!(live_resources = self.resources.live_count(), "shell torn down");
    }

    pub fn is_mounted(&self) -> bool {
        self.theme_subscription.is_some()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    pub fn uploaded_image(&self) -> Option<&UploadedImage> {
        self.uploaded_image.as_ref()
    }

    /// Apply a change described by a form widget
    pub fn apply_change(&mut self, change: FieldChange) {
        tracing::trace!(?change, "field changed");
        self.form.apply(change);
    }

    /// Route a key event through the installed shortcuts. Returns true if consumed.
    pub fn dispatch_shortcut(&mut self, key: &KeyEvent) -> bool {
        match self.shortcuts.dispatch(key) {
            Some(ShortcutAction::CycleTheme) => {
                self.cycle_theme();
                true
            }
            None => false,
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.advance();
        tracing::debug!(theme = self.theme.name(), "theme changed");
    }

    /// Take ownership of a newly selected file, releasing the previous upload.
    pub fn handle_image_upload(&mut self, file: SelectedFile) {
        let handle = self.resources.create(&file);
        let name = file.file_name();
        tracing::info!(file = %name, reference = %handle.reference(), "image uploaded");

        self.uploaded_image = Some(UploadedImage::new(file, handle));
        self.set_status(&format!("Uploaded: {}", name), false);
    }

    /// Reference the preview displays: the upload, or the placeholder
    pub fn preview_reference(&self) -> ImageRef {
        self.uploaded_image
            .as_ref()
            .map(|img| img.reference().clone())
            .unwrap_or(ImageRef::Placeholder)
    }

    pub fn preview_image(&self) -> PreviewImage {
        self.resources.resolve(&self.preview_reference())
    }

    /// Compose the preview for the current image, text and theme.
    pub fn mockup(&self, width: usize, max_height: Option<usize>) -> Mockup {
        let image = self.preview_image();
        render_mockup(&MockupInput {
            image: &image,
            custom_text: &self.form.data().custom_text,
            theme: self.theme,
            width,
            max_height,
        })
    }

    /// Hand the current values to the sink. Validation errors do not block this.
    pub fn submit(&mut self) {
        if self.form.has_errors() {
            let fields: Vec<&str> = self.form.errors().keys().map(|f| f.name()).collect();
            tracing::warn!(?fields, "submitting with validation errors");
        }
        let snapshot = self.form.snapshot();
        let ack = self.sink.submit(snapshot);
        self.set_status("Customization saved", false);
        self.acknowledgement = Some(ack);
    }

    pub fn dismiss_acknowledgement(&mut self) {
        self.acknowledgement = None;
    }

    /// Open the file picker prompt
    pub fn start_upload_prompt(&mut self) {
        self.upload_prompt_active = true;
        self.upload_prompt_input.clear();
        self.set_status("Enter image path and press Enter", false);
    }

    pub fn cancel_upload_prompt(&mut self) {
        self.upload_prompt_active = false;
        self.upload_prompt_input.clear();
        self.set_status("Upload cancelled", false);
    }

    /// Select the file named in the prompt.
    ///
    /// An empty or unreadable path leaves the current upload untouched.
    pub fn submit_upload_prompt(&mut self) {
        let input = self.upload_prompt_input.trim().to_string();
        self.upload_prompt_active = false;
        self.upload_prompt_input.clear();

        let path = (!input.is_empty()).then(|| std::path::PathBuf::from(input));
        if let Some(file) = crate::upload::select_file(path.as_deref()) {
            self.handle_image_upload(file);
        }
    }

    /// Update terminal size on resize
    pub fn set_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    /// Set status message
    pub fn set_status(&mut self, message: &str, is_error: bool) {
        self.status_message = message.to_string();
        self.status_is_error = is_error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NotifySink;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn shell() -> AppShell {
        AppShell::new(
            Config::default(),
            TerminalCapabilities::default(),
            Box::new(NotifySink),
        )
    }

    #[test]
    fn test_focus_cycle() {
        let mut focus = FocusedWidget::default();
        for _ in 0..6 {
            focus = focus.next();
        }
        assert_eq!(focus, FocusedWidget::Height);
        assert_eq!(FocusedWidget::Height.prev(), FocusedWidget::Submit);
    }

    #[test]
    fn test_shortcut_only_active_while_mounted() {
        let mut shell = shell();
        let alt_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::ALT);

        assert!(!shell.dispatch_shortcut(&alt_q));
        assert_eq!(shell.theme(), Theme::Classic);

        shell.mount();
        shell.mount();
        assert!(shell.dispatch_shortcut(&alt_q));
        assert_eq!(shell.theme(), Theme::Dark);

        shell.teardown();
        assert!(!shell.is_mounted());
        assert!(!shell.dispatch_shortcut(&alt_q));
        assert_eq!(shell.theme(), Theme::Dark);
    }

    #[test]
    fn test_empty_upload_prompt_is_noop() {
        let mut shell = shell();
        shell.start_upload_prompt();
        shell.submit_upload_prompt();
        assert!(!shell.upload_prompt_active);
        assert_eq!(shell.preview_reference(), ImageRef::Placeholder);
    }

    #[test]
    fn test_submit_sets_acknowledgement() {
        let mut shell = shell();
        shell.submit();
        assert!(shell.acknowledgement.is_some());
        shell.dismiss_acknowledgement();
        assert!(shell.acknowledgement.is_none());
    }
}
