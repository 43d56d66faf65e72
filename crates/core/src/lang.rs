//! Language and toolchain conventions
//!
//! Fixed names shared with the AnteaterLang toolchain: file extensions,
//! the interpreter binary, build artifact locations, and the canned sample
//! sources offered by the AnteaterLang menu.

/// Extension of AnteaterLang interpreter sources.
pub const SOURCE_EXTENSION: &str = "ant";

/// Extension of C acc library sources.
pub const C_LIBRARY_EXTENSION: &str = "c";

/// Human-readable name of the interpreter-source classification.
pub const SOURCE_DESCRIPTION: &str = "AnteaterLang Source";

/// Human-readable name of the native-library classification.
pub const C_LIBRARY_DESCRIPTION: &str = "C Acc Library Source";

/// Session record file, stored directly under the project root.
pub const SESSION_FILE_NAME: &str = "ideconfig.json";

/// The external interpreter binary, resolved via PATH.
pub const INTERPRETER_BINARY: &str = "antlang";

/// Expected prefix of `antlang --version` output. Anything else means the
/// toolchain is not installed.
pub const VERSION_PREFIX: &str = "AnteaterLang Version";

/// Shared library produced by a C acc library build, at the project root.
pub const SHARED_LIBRARY_NAME: &str = "libuserFunctions.so";

/// Intermediate object file of the compile step, removed after linking.
pub const OBJECT_FILE_NAME: &str = "userFunctions.o";

/// Header search directory for C acc library builds.
pub const INCLUDE_DIR: &str = "/usr/local/include/anteaterlang";

/// Library search directory for the link step.
pub const LIB_DIR: &str = "/usr/local/lib";

/// Runtime support library the shared object links against.
pub const RUNTIME_LIBRARY: &str = "lang";

/// Default editor font size in points.
pub const DEFAULT_EDITOR_FONT_SIZE: u32 = 15;

/// Default terminal font size in points.
pub const DEFAULT_TERMINAL_FONT_SIZE: u32 = 15;

/// Default number of spaces per tab stop.
pub const DEFAULT_TAB_SPACES: u32 = 4;

/// Canned AnteaterLang hello-world source.
pub const SAMPLE_ANT_SOURCE: &str = r#"void function native_hello_world() {
    println("Hello World!");
}

void function main() {

    # Builtin function
    native_hello_world();

    # C function
    c_hello_world();
}
"#;

/// Canned C acc library skeleton with one registered user function.
pub const SAMPLE_C_LIBRARY_SOURCE: &str = r#"#include "chunk.h"
#include "object.h"
#include "primitiveVars.h"

// Use this macro to define a new user function in the array
#define USER_FUNCTION(inCount, outCount, funcName, cFunction) {.in = inCount, .out = outCount, .name = funcName, .cFunc = cFunction}

// This is the definition of a user function
// Value (*cMethodType)(Value, Value*, int);

// Define functions here

// Sample Function
Value helloWorld(Value self, Value* args, int numArgs){
    printf("Hello World!\n");

    return NONE_VAL;
}


// This is what the VM will use to integrate with the host language

// Change the number of functions here
uint32_t funcCount = 1;

// Add the functions here, add a new line & comma for each function
userFunction userFuncs[] = {
USER_FUNCTION(0, 0, "c_hello_world", helloWorld)
};
"#;
