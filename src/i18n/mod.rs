//! Internationalization (i18n) module.
//!
//! Provides localized strings for the client UI and CLI output.
//! English is the default language; Spanish is available as an alternative.

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// English (default)
    En,
    /// Spanish
    Es,
}

impl Lang {
    /// Parse a language code string (e.g. "en", "es", "en_US", "es_ES").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.to_lowercase();
        let prefix = normalized.split(['_', '-', '.']).next().unwrap_or("");
        match prefix {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Initialize the global language. Call once at startup.
/// If already initialized, this is a no-op.
pub fn set_lang(lang: Lang) {
    let _ = CURRENT_LANG.set(lang);
}

/// Get the currently configured language (defaults to English).
pub fn lang() -> Lang {
    CURRENT_LANG.get().copied().unwrap_or(Lang::En)
}

/// Detect language from the `INBOXSHELL_LANG` / `LC_MESSAGES` / `LANG` environment variables.
pub fn detect_system_lang() -> Lang {
    std::env::var("INBOXSHELL_LANG")
        .ok()
        .and_then(|v| Lang::from_code(&v))
        .or_else(|| {
            std::env::var("LC_MESSAGES")
                .ok()
                .and_then(|v| Lang::from_code(&v))
        })
        .or_else(|| std::env::var("LANG").ok().and_then(|v| Lang::from_code(&v)))
        .unwrap_or(Lang::En)
}

/// Macro for defining translatable message functions.
/// Each function returns a `&'static str` based on the current language.
macro_rules! msg {
    ($name:ident, $en:expr, $es:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::En => $en,
                Lang::Es => $es,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(app_name, "inboxShell", "inboxShell");
msg!(
    app_about,
    "inboxShell \u{2014} Terminal client for a WebSocket mail server. Browse inboxes and send email with attachments.",
    "inboxShell \u{2014} Cliente de terminal para un servidor de correo WebSocket. Consulta buzones y env\u{ed}a correo con adjuntos."
);
msg!(
    app_long_about,
    "inboxShell \u{2014} Terminal client for a WebSocket mail server.\nBrowse recipient inboxes, read messages and send email with\nattachments over a single auto-reconnecting connection.",
    "inboxShell \u{2014} Cliente de terminal para un servidor de correo WebSocket.\nConsulta los buzones de destinatarios, lee mensajes y env\u{ed}a correo\ncon adjuntos sobre una \u{fa}nica conexi\u{f3}n con reconexi\u{f3}n autom\u{e1}tica."
);

// ── CLI help strings ─────────────────────────────────────────────

msg!(
    help_verbose,
    "Verbose logging (-v info, -vv debug, -vvv trace)",
    "Registro detallado (-v info, -vv debug, -vvv trace)"
);
msg!(
    help_lang,
    "Language (en, es). Defaults to system locale",
    "Idioma (en, es). Por defecto usa el idioma del sistema"
);
msg!(
    help_server,
    "WebSocket URL of the mail server",
    "URL WebSocket del servidor de correo"
);
msg!(
    help_cmd_tui,
    "Open the interactive client (default if no subcommand given)",
    "Abrir el cliente interactivo (por defecto si no se da subcomando)"
);
msg!(help_cmd_send, "Send an email", "Enviar un correo");
msg!(
    help_cmd_recipients,
    "List recipient mailboxes",
    "Listar los buzones de destinatarios"
);
msg!(
    help_cmd_emails,
    "List the emails filed for a recipient",
    "Listar los correos de un destinatario"
);
msg!(
    help_cmd_read,
    "Print the content of one email",
    "Mostrar el contenido de un correo"
);
msg!(
    help_cmd_completions,
    "Generate shell completions",
    "Generar autocompletado para la shell"
);
msg!(
    help_cmd_config,
    "Show the effective configuration (--init writes it)",
    "Mostrar la configuraci\u{f3}n efectiva (--init la guarda)"
);
msg!(help_cmd_manpage, "Generate a man page", "Generar p\u{e1}gina de manual");
msg!(help_output_json, "Output as JSON", "Salida en formato JSON");

// ── Status messages ──────────────────────────────────────────────

msg!(
    status_connected,
    "Connected to SMTP server",
    "Conectado al servidor SMTP"
);
msg!(status_connection_error, "Connection error", "Error de conexi\u{f3}n");
msg!(
    status_disconnected,
    "Disconnected from server",
    "Desconectado del servidor"
);
msg!(status_sending, "Sending email...", "Enviando correo...");
msg!(status_attached, "Attached", "Adjuntado");
msg!(status_removed, "Removed", "Eliminado");
msg!(status_form_cleared, "Form cleared", "Formulario borrado");
msg!(
    err_sender_and_recipients_required,
    "Sender and recipients are required",
    "El remitente y los destinatarios son obligatorios"
);
msg!(
    err_recipient_required,
    "At least one recipient is required",
    "Se necesita al menos un destinatario"
);
msg!(
    err_not_connected,
    "Not connected to server",
    "Sin conexi\u{f3}n con el servidor"
);
msg!(
    err_attachment_read,
    "Could not read attachment",
    "No se pudo leer el adjunto"
);

// ── TUI strings ──────────────────────────────────────────────────

msg!(tui_connected, "Connected", "Conectado");
msg!(tui_connecting, "Connecting...", "Conectando...");
msg!(tui_disconnected, "Disconnected", "Desconectado");
msg!(tui_compose_title, " Compose ", " Redactar ");
msg!(tui_recipients_title, " Recipients ", " Destinatarios ");
msg!(tui_emails_title, " Emails ", " Correos ");
msg!(tui_content_title, " Content ", " Contenido ");
msg!(tui_attachments_title, " Attachments ", " Adjuntos ");
msg!(tui_field_sender, "From", "De");
msg!(tui_field_recipients, "To", "Para");
msg!(tui_field_subject, "Subject", "Asunto");
msg!(tui_field_body, "Body", "Cuerpo");
msg!(tui_no_attachments, "No attachments", "Sin adjuntos");
msg!(tui_files_attached, "file(s) attached", "fichero(s) adjunto(s)");
msg!(tui_no_emails_yet, "No emails yet", "A\u{fa}n no hay correos");
msg!(tui_no_emails, "No emails", "Sin correos");
msg!(
    tui_select_recipient,
    "Select a recipient",
    "Selecciona un destinatario"
);
msg!(
    tui_select_email,
    "Select an email to view",
    "Selecciona un correo para verlo"
);
msg!(tui_email_count, "email(s)", "correo(s)");
msg!(tui_attachment_label, "Attachment", "Adjunto");
msg!(
    tui_attach_prompt,
    " Attach (paths, comma-separated): ",
    " Adjuntar (rutas separadas por comas): "
);
msg!(tui_send_ready, "[ Send ]", "[ Enviar ]");
msg!(tui_send_busy, "[ ...... ]", "[ ...... ]");
msg!(tui_help_title, " Keyboard shortcuts ", " Atajos de teclado ");
msg!(
    tui_help_description,
    "Terminal client for the mailbox server",
    "Cliente de terminal para el servidor de correo"
);
msg!(tui_help_general, "General", "General");
msg!(tui_help_compose, "Compose", "Redactar");
msg!(tui_help_mailbox, "Mailbox", "Buz\u{f3}n");
msg!(tui_help_cycle_panel, "Next / previous panel", "Panel siguiente / anterior");
msg!(tui_help_toggle, "Show / hide this help", "Mostrar / ocultar esta ayuda");
msg!(tui_help_quit, "Quit", "Salir");
msg!(tui_help_next_field, "Next / previous field", "Campo siguiente / anterior");
msg!(tui_help_send, "Send email", "Enviar correo");
msg!(tui_help_attach, "Attach files", "Adjuntar ficheros");
msg!(tui_help_clear, "Clear form", "Borrar formulario");
msg!(tui_help_remove, "Remove attachment", "Quitar adjunto");
msg!(tui_help_move, "Move selection", "Mover selecci\u{f3}n");
msg!(tui_help_open, "Open selected", "Abrir selecci\u{f3}n");
msg!(tui_help_refresh, "Refresh inbox", "Actualizar buz\u{f3}n");
msg!(tui_help_scroll, "Scroll content", "Desplazar contenido");

msg!(tui_hint_nav, "navigate", "navegar");
msg!(tui_hint_select, "select", "seleccionar");
msg!(tui_hint_send, "send", "enviar");
msg!(tui_hint_attach, "attach", "adjuntar");
msg!(tui_hint_clear, "clear", "borrar");
msg!(tui_hint_refresh, "refresh", "actualizar");
msg!(tui_hint_remove, "remove", "quitar");
msg!(tui_hint_panel, "panel", "panel");
msg!(tui_hint_field, "field", "campo");
msg!(tui_hint_scroll, "scroll", "desplazar");
msg!(tui_hint_help, "help", "ayuda");
msg!(tui_hint_quit, "quit", "salir");
msg!(tui_hint_cancel, "cancel", "cancelar");
msg!(tui_hint_confirm, "confirm", "confirmar");

// ── CLI output ───────────────────────────────────────────────────

msg!(cli_connecting, "Connecting to", "Conectando a");
msg!(cli_waiting, "Waiting for server", "Esperando al servidor");
msg!(cli_reading_attachments, "Reading attachments", "Leyendo adjuntos");
msg!(cli_no_recipients, "No emails yet.", "A\u{fa}n no hay correos.");
msg!(cli_no_emails, "No emails for", "No hay correos para");
msg!(cli_col_recipient, "Recipient", "Destinatario");
msg!(cli_col_count, "Emails", "Correos");
msg!(cli_col_file, "File", "Fichero");
msg!(cli_config_file, "Config file", "Fichero de configuraci\u{f3}n");
msg!(cli_log_file, "Log file", "Fichero de registro");
