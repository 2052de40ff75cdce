mod nested_match;
mod statement;
