//! Bridge to the `log` crate
//!
//! Fields are attached to the record as `log` key/values and substituted, in order, into the
//! `{}` placeholders of the template.
use super::LogBackend;
use crate::{argument::StructuredArgument, levels::Level};

/// Forwards events to the logger installed with `log::set_logger`, under a fixed target.
#[derive(Debug, Clone)]
pub struct LogCrateBackend {
    target: String,
}

impl LogCrateBackend {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl LogBackend for LogCrateBackend {
    fn is_enabled(&self, level: Level) -> bool {
        let level = log::Level::from(level);
        level <= log::max_level()
            && log::logger().enabled(
                &log::Metadata::builder()
                    .level(level)
                    .target(&self.target)
                    .build(),
            )
    }

    fn log(&self, level: Level, template: &str, args: &[StructuredArgument]) {
        let message = format_template(template, args);
        let source = ArgumentSource(args);
        log::logger().log(
            &log::Record::builder()
                .args(format_args!("{message}"))
                .level(level.into())
                .target(&self.target)
                .key_values(&source)
                .build(),
        );
    }
}

struct ArgumentSource<'a>(&'a [StructuredArgument]);

impl log::kv::Source for ArgumentSource<'_> {
    fn visit<'kvs>(
        &'kvs self,
        visitor: &mut dyn log::kv::VisitSource<'kvs>,
    ) -> Result<(), log::kv::Error> {
        for arg in self.0 {
            for (key, value) in arg.pairs() {
                visitor.visit_pair(
                    log::kv::Key::from_str(key),
                    log::kv::Value::from_display(value),
                )?;
            }
        }
        Ok(())
    }
}

/// Replaces each `{}` of the template by the next field.
///
/// Placeholders left without a field stay as they are; fields left without a placeholder are
/// not rendered in the message.
pub fn format_template(template: &str, args: &[StructuredArgument]) -> String {
    let mut message = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(idx) = rest.find("{}") {
        let Some(arg) = args.next() else {
            break;
        };
        message.push_str(&rest[..idx]);
        message.push_str(&arg.to_string());
        rest = &rest[idx + 2..];
    }
    message.push_str(rest);
    message
}
