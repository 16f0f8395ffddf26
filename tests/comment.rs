#[macro_use]
mod common;

#[cfg(test)]
mod comment {
    tests! {
        line_at_eof in comment is OK
        "ok"
    }

    tests! {
        only_comment in comment is OK
    }

    tests! {
        block in comment is OK
        "ok"
        "also"
    }

    tests! {
        nested in comment is OK
        "ok"
    }

    tests! {
        unterminated_block in comment is OK
        "ok"
    }
}
