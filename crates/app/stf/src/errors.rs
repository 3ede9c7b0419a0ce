use gasless_core::define_error;

define_error!(
    ERR_OVERLAY_SIZE_EXCEEDED,
    0x0A,
    "overlay size limit exceeded"
);
define_error!(ERR_TOO_MANY_EVENTS, 0x10, "too many events emitted");
define_error!(ERR_KEY_TOO_LARGE, 0x11, "storage key too large");
define_error!(ERR_VALUE_TOO_LARGE, 0x12, "storage value too large");
define_error!(
    ERR_INVALID_CHECKPOINT,
    0x13,
    "checkpoint does not belong to this execution state"
);
