#[macro_use]
mod common;

#[cfg(test)]
mod while_stmt {
    tests! {
        syntax in while is OK
        "1"
        "2"
        "3"
    }

    tests! {
        closure_in_body in while is OK
        "1"
    }

    tests! {
        return_inside in while is OK
        "done"
    }
}
