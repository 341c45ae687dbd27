use globefield::{Animator, AnimatorError};

fn main() -> Result<(), AnimatorError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    Animator::new()
        .with_title("globefield")
        .with_size(1280, 720)
        .run()
}
