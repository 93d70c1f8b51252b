// src/macros.rs

/// Builds and runs a command from a `{}` template, quoting every value.
///
/// `sh!("echo {}", x)` runs under [`Shell::current`](crate::Shell::current);
/// `sh!(shell; "echo {}", x)` runs under an explicit context. Values may be
/// anything convertible into [`Arg`](crate::Arg), including a previous
/// [`ProcessOutput`](crate::ProcessOutput). Write `{{}}` for a literal `{}`
/// that should reach the shell untouched.
///
/// ```no_run
/// # async fn demo() -> Result<(), shellout::ExecutionError> {
/// use shellout::sh;
///
/// let name = "my file.txt";
/// sh!("touch {}", name).await?;
/// let count = sh!("ls | wc -l").await?;
/// sh!("echo {} files", &count).await?;
/// sh!("find . -name {} -exec rm {{}} +", "*.tmp").await?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! sh {
    ($shell:expr; $template:expr $(, $arg:expr)* $(,)?) => {
        $shell.run(
            $crate::Template::parse($template),
            ::std::vec![$($crate::Arg::from($arg)),*],
        )
    };
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::Shell::current().run(
            $crate::Template::parse($template),
            ::std::vec![$($crate::Arg::from($arg)),*],
        )
    };
}
