//! Fixed strings shared across the generator.

pub const APP_NAME: &str = "configure";

/// Default path of the generated descriptor, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "build.ninja";

pub const BUILD_DIR: &str = "out";

pub const BASE_CFLAGS: &str = "-Wall -Wextra -Werror -fdiagnostics-color -flto=auto -D_FORTIFY_SOURCE=2 -fopenmp";

pub const BASE_INCLUDES: &str = "-Iinclude -Ilibs/quat/include";

pub const SANITIZER_FLAGS: &str = "-fsanitize=address,undefined";

/// Macro substitutions applied under `--enable-compatible`.
pub const COMPAT_DEFINES: &str = "-Dconstexpr=const \"-Dstatic_assert(x)=\" -DENABLE_COMPAT";

pub const STD_DEFAULT: &str = "-std=gnu23";
pub const STD_COMPAT: &str = "-std=gnu2x";

/// Libraries every cross-compiled binary links against.
pub const CROSS_LIBS: &str = "-lgdi32 -mwindows";
pub const CROSS_INCLUDES: &str = "-I/usr/x86_64-w64-mingw32/include";

pub const EXE_SUFFIX: &str = ".exe";

/// Token appended to the version string by debug-family build modes.
pub const DEBUG_VERSION_SUFFIX: &str = "debug";

/// Version used when an eager `git describe` produced nothing usable.
pub const UNKNOWN_VERSION: &str = "unknown";

pub const GIT: &str = "git";
pub const GIT_DESCRIBE_ARGS: &[&str] = &["describe", "--always", "--dirty"];

/// Format of the timestamp recorded in the descriptor header.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%y %H:%M:%S";
