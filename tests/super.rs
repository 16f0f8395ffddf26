#[macro_use]
mod common;

#[cfg(test)]
mod _super {
    tests! {
        call_same_method in super is OK
        "Derived.foo()"
        "Base.foo()"
    }

    tests! {
        call_other_method in super is OK
        "Derived.bar()"
        "Base.foo()"
    }

    tests! {
        constructor in super is OK
        "Derived.init()"
        "Base.init(a, b)"
    }

    tests! {
        closure in super is OK
        "Base"
    }

    tests! {
        indirectly_inherited in super is OK
        "C.foo()"
        "A.foo()"
    }

    tests! {
        this_in_superclass_method in super is OK
        "a"
        "b"
    }

    tests! {
        reassign_superclass in super is OK
        "Base.method()"
        "Base.method()"
    }

    tests! {
        no_superclass_bind in super is ERR
        "[line 3] Error at 'super': Can't use 'super' in a class with no superclass."
    }

    tests! {
        no_superclass_call in super is ERR
        "[line 3] Error at 'super': Can't use 'super' in a class with no superclass."
    }

    tests! {
        no_superclass_method in super is ERR
        "Undefined property 'doesNotExist'."
        "[line 4]"
    }

    tests! {
        super_at_top_level in super is ERR
        "[line 1] Error at 'super': Can't use 'super' outside of a class."
        "[line 2] Error at 'super': Can't use 'super' outside of a class."
    }

    tests! {
        super_in_top_level_function in super is ERR
        "[line 2] Error at 'super': Can't use 'super' outside of a class."
    }

    tests! {
        super_without_dot in super is ERR
        "[line 4] Error at ';': Expect '.' after 'super'."
    }

    tests! {
        super_without_name in super is ERR
        "[line 4] Error at ';': Expect superclass method name."
    }

    tests! {
        extra_arguments in super is ERR
        "Expected 2 arguments but got 4."
        "[line 9]"
    }

    tests! {
        missing_arguments in super is ERR
        "Expected 2 arguments but got 1."
        "[line 6]"
    }
}
