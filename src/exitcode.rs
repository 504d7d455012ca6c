//! Process exit codes (sysexits.h values)
//!
//! | code | when |
//! |------|------|
//! | 64 | bad flags, no data file configured |
//! | 65 | data file is not a valid dataset |
//! | 66 | data file missing |
//! | 70 | unexpected failure while reading |
//! | 73 | `config init` target already exists |
//! | 74 | terminal or filesystem I/O |
//! | 78 | unreadable or invalid settings |

pub const USAGE: i32 = 64;
pub const DATAERR: i32 = 65;
pub const NOINPUT: i32 = 66;
pub const SOFTWARE: i32 = 70;
pub const CANTCREAT: i32 = 73;
pub const IOERR: i32 = 74;
pub const CONFIG: i32 = 78;
