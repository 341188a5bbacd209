use gesture_lens::app::{self, Flags};
use pico_args;

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        dataset_url: args.opt_value_from_str("--dataset-url").unwrap_or(None),
    };

    app::run(flags)
}
