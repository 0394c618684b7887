use iced_feedwall::app::{self, Flags};
use pico_args;

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        lang: args.opt_value_from_str("--lang").unwrap(),
        config_path: args.opt_value_from_str("--config").unwrap(),
        feed_urls: args
            .finish()
            .into_iter()
            .filter_map(|s| s.into_string().ok())
            .collect(),
    };

    app::run(flags)
}
